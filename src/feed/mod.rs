//! The review feed: records, row items and the pagination engine.

pub mod engine;
pub mod error;
pub mod items;
pub mod pluralize;
pub mod record;
pub mod source;
pub mod state;
pub mod text;

pub use engine::{
    DEFAULT_LOOK_AHEAD_SCREENS, EngineOptions, FeedChannels, PaginationEngine, ScrollSignal,
};
pub use error::FeedError;
pub use items::{
    AVATAR_GUTTER, AVATAR_ROWS, DEFAULT_COLLAPSED_LINES, ListItem, RowContent, RowLine,
    SHOW_MORE_LABEL,
};
pub use pluralize::ReviewCountDeclension;
pub use record::ReviewPage;
pub use source::{FileReviewSource, HttpReviewSource, ReviewSource};
pub use state::{DEFAULT_PAGE_SIZE, FeedState, GENERIC_ERROR_MESSAGE, LoadingStage};
