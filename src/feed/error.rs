use thiserror::Error;

/// Failures coming out of a review source or the record mapping step.
///
/// None of these ever leave the pagination engine: they are logged and turned
/// into [`FeedState`](super::FeedState) changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode page: {0}")]
    Decode(String),

    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
