use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Decoded avatars kept in memory
    #[serde(default = "CacheConfig::default_max_entries")]
    pub max_entries: usize,
}

impl CacheConfig {
    fn default_max_entries() -> usize {
        crate::avatar::DEFAULT_MAX_ENTRIES
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::default_max_entries(),
        }
    }
}
