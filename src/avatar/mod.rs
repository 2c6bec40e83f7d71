//! Avatar images: a shared cache and the per-slot loader in front of it.

pub mod cache;
pub mod fetcher;
pub mod loader;

pub use cache::{DEFAULT_MAX_ENTRIES, new_shared_cache};
pub use fetcher::HttpAvatarFetcher;
pub use loader::{AvatarDelivery, AvatarLoader, AvatarMessage, AvatarSlot, SWATCH_WIDTH, SlotId};
