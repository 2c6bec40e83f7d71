use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where reviews are paged from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// "http" or "file"
    #[serde(default)]
    pub kind: SourceKind,
    /// Endpoint queried as `<endpoint>?offset=N&limit=M`
    #[serde(default = "SourceConfig::default_endpoint")]
    pub endpoint: String,
    /// JSON document with the whole collection, used when kind = "file"
    #[serde(default)]
    pub file: Option<String>,
    /// Reviews requested per page
    #[serde(default = "SourceConfig::default_page_size")]
    pub page_size: usize,
    /// Request timeout for pages and avatars
    #[serde(default = "SourceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SourceConfig {
    fn default_endpoint() -> String {
        "http://127.0.0.1:8080/reviews".to_string()
    }

    fn default_page_size() -> usize {
        crate::feed::DEFAULT_PAGE_SIZE
    }

    fn default_timeout_secs() -> u64 {
        10
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            endpoint: Self::default_endpoint(),
            file: None,
            page_size: Self::default_page_size(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}
