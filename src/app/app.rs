use std::rc::Rc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::binds_handler::KeyBinds;
use crate::app::config::Config;
use crate::app::screen::ReviewScreen;
use crate::avatar::{AvatarLoader, AvatarMessage};
use crate::feed::{FeedChannels, PaginationEngine};
use crate::ui::DirtyFlags;

/// Everything the review screen owns. Lives on the main task only.
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub config: Config,
    pub engine: PaginationEngine,
    pub loader: AvatarLoader,
    pub screen: ReviewScreen,
    pub key_binds: KeyBinds,
    /// Shared with the engine callbacks
    pub dirty: Rc<DirtyFlags>,
    /// Config warnings collected at startup
    pub config_warnings: Vec<String>,
    /// Shown until the first key press
    pub show_config_warnings_popup: bool,
    pub source_name: String,
}

/// Receivers the main loop polls and feeds back into the [`App`].
pub struct AppChannels {
    pub feed: FeedChannels,
    pub avatars: UnboundedReceiver<AvatarMessage>,
}
