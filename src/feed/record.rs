use serde::Deserialize;

use super::FeedError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One review as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewRecord {
    pub text: String,
    pub created: String,
    pub first_name: String,
    pub last_name: String,
    pub rating: u8,
    /// Missing avatars fall back to the placeholder.
    #[serde(default)]
    pub avatar_url: String,
}

impl ReviewRecord {
    /// Map a single raw record, rejecting it if it does not decode or its
    /// rating is outside `1..=5`.
    pub fn from_value(index: usize, value: serde_json::Value) -> Result<Self, FeedError> {
        let record: ReviewRecord =
            serde_json::from_value(value).map_err(|e| FeedError::MalformedRecord {
                index,
                reason: e.to_string(),
            })?;

        if !(MIN_RATING..=MAX_RATING).contains(&record.rating) {
            return Err(FeedError::MalformedRecord {
                index,
                reason: format!("rating {} outside {}..={}", record.rating, MIN_RATING, MAX_RATING),
            });
        }

        Ok(record)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A page of reviews: `{"items": [...], "count": N}`.
///
/// Records stay as raw JSON so that one bad record can be skipped without
/// rejecting the whole page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    pub count: usize,
}

impl ReviewPage {
    /// Slice a full collection down to the `offset..offset + limit` window,
    /// keeping the declared total.
    pub fn window(self, offset: usize, limit: usize) -> Self {
        Self {
            items: self.items.into_iter().skip(offset).take(limit).collect(),
            count: self.count,
        }
    }
}
