use serde::{Deserialize, Serialize};

use crate::feed::{DEFAULT_COLLAPSED_LINES, DEFAULT_LOOK_AHEAD_SCREENS};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Viewports of content left below the screen before the next page loads
    #[serde(default = "FeedConfig::default_look_ahead_screens")]
    pub look_ahead_screens: f32,
    /// Body lines shown before a review is clipped
    #[serde(default = "FeedConfig::default_collapsed_lines")]
    pub collapsed_lines: usize,
}

impl FeedConfig {
    fn default_look_ahead_screens() -> f32 {
        DEFAULT_LOOK_AHEAD_SCREENS
    }

    fn default_collapsed_lines() -> usize {
        DEFAULT_COLLAPSED_LINES
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            look_ahead_screens: Self::default_look_ahead_screens(),
            collapsed_lines: Self::default_collapsed_lines(),
        }
    }
}
