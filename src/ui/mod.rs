pub mod dirty;
pub mod renderer;
pub mod utils;
pub mod widgets;

pub use dirty::DirtyFlags;
pub use renderer::{FeedView, render};
