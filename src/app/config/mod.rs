pub mod binds;
pub mod cache;
pub mod colors;
pub mod feed;
pub mod format;
pub mod logging;
pub mod source;

pub use format::Config;
pub use logging::LoggingConfig;
pub use source::SourceKind;
