use super::items::{ItemId, ListItem, ReviewItem};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const GENERIC_ERROR_MESSAGE: &str = "Что-то пошло не так...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStage {
    #[default]
    InitialLoading,
    Loaded,
    Refreshing,
    Failed,
}

/// Everything the screen renders. Only the pagination engine mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub(super) items: Vec<ListItem>,
    pub(super) page_size: usize,
    pub(super) next_offset: usize,
    pub(super) can_load_more: bool,
    pub(super) stage: LoadingStage,
    pub(super) error_message: Option<String>,
    pub(super) skipped_records: usize,
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            next_offset: 0,
            can_load_more: true,
            stage: LoadingStage::InitialLoading,
            error_message: None,
            skipped_records: 0,
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    #[cfg(test)]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[cfg(test)]
    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    #[cfg(test)]
    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    pub fn stage(&self) -> LoadingStage {
        self.stage
    }

    /// Present only while `stage` is [`LoadingStage::Failed`].
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    pub fn review_count(&self) -> usize {
        self.items.iter().filter(|i| !i.is_summary()).count()
    }

    pub fn has_summary(&self) -> bool {
        self.items.last().is_some_and(ListItem::is_summary)
    }

    /// A failure with nothing loaded yet replaces the whole list.
    pub fn is_blocking_error(&self) -> bool {
        self.stage == LoadingStage::Failed && self.items.is_empty()
    }

    pub(super) fn find_review_mut(&mut self, id: ItemId) -> Option<&mut ReviewItem> {
        self.items
            .iter_mut()
            .filter_map(ListItem::as_review_mut)
            .find(|review| review.id == id)
    }

    pub(super) fn reset_for_refresh(&mut self) {
        self.items.clear();
        self.next_offset = 0;
        self.can_load_more = true;
        self.stage = LoadingStage::Refreshing;
        self.error_message = None;
        self.skipped_records = 0;
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
