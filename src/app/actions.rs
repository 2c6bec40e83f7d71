/// Everything a key binding can ask the review screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedAction {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    /// Drop the feed and load it again from the first page
    Refresh,
    /// Show the full text of the selected review
    ExpandSelected,
    /// Retry the last failed page
    Retry,
}
