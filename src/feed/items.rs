//! Row kinds stored in the feed.
//!
//! Every row is a [`ListItem`]; the screen measures and binds rows without
//! knowing which variant it holds. Measurement is a pure function of the
//! content and the available width, so it can run on every frame.

use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

use super::engine::FeedCommand;
use super::pluralize::Pluralizer;
use super::record::ReviewRecord;
use super::text::wrap_by_width;

pub const SHOW_MORE_LABEL: &str = "Показать полностью...";
pub const DEFAULT_COLLAPSED_LINES: usize = 3;

/// Columns reserved on the left of a review row for the avatar.
pub const AVATAR_GUTTER: u16 = 6;
/// Rows the avatar occupies; a review is never shorter than this.
pub const AVATAR_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One logical line of a bound row. Styling is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLine {
    Header { author: String, rating: u8 },
    Body(String),
    ShowMore,
    Created(String),
    Summary(String),
    Blank,
}

/// The display-side target of [`ListItem::bind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowContent {
    pub item: Option<ItemId>,
    pub lines: Vec<RowLine>,
    /// Resource id the row wants shown in its avatar area.
    pub avatar: Option<String>,
}

impl RowContent {
    pub fn clear(&mut self) {
        self.item = None;
        self.lines.clear();
        self.avatar = None;
    }
}

/// Sends a request to expand one review back to the engine that owns it.
#[derive(Clone)]
pub struct ExpandHandle {
    id: ItemId,
    commands: UnboundedSender<FeedCommand>,
}

impl ExpandHandle {
    pub fn new(id: ItemId, commands: UnboundedSender<FeedCommand>) -> Self {
        Self { id, commands }
    }

    pub fn request(&self) {
        if self.commands.send(FeedCommand::Expand(self.id)).is_err() {
            log::debug!("Expand request for {} dropped, feed is gone", self.id);
        }
    }
}

impl fmt::Debug for ExpandHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandHandle").field("id", &self.id).finish()
    }
}

impl PartialEq for ExpandHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: ItemId,
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub created: String,
    pub avatar: String,
    /// Whether the body is shown in full or clipped to `collapsed_lines`.
    pub expanded: bool,
    pub collapsed_lines: usize,
    on_show_more: ExpandHandle,
}

impl ReviewItem {
    pub fn from_record(
        id: ItemId,
        record: ReviewRecord,
        collapsed_lines: usize,
        on_show_more: ExpandHandle,
    ) -> Self {
        Self {
            id,
            author: record.full_name(),
            rating: record.rating,
            text: record.text.trim().to_string(),
            created: record.created.trim().to_string(),
            avatar: record.avatar_url,
            expanded: false,
            collapsed_lines,
            on_show_more,
        }
    }

    /// Ask the owning feed to show the full text of this review.
    pub fn show_more(&self) {
        self.on_show_more.request();
    }

    fn text_width(width: u16) -> usize {
        width.saturating_sub(AVATAR_GUTTER) as usize
    }

    /// Visible body lines and whether the text was clipped.
    fn body_lines(&self, width: u16) -> (Vec<String>, bool) {
        let mut lines = wrap_by_width(&self.text, Self::text_width(width));
        if self.expanded || lines.len() <= self.collapsed_lines {
            return (lines, false);
        }
        lines.truncate(self.collapsed_lines);
        (lines, true)
    }

    #[cfg(test)]
    pub fn is_clipped(&self, width: u16) -> bool {
        self.body_lines(width).1
    }

    fn measure(&self, width: u16) -> u16 {
        if Self::text_width(width) == 0 {
            return 0;
        }
        let (body, clipped) = self.body_lines(width);
        // header + body + optional "show more" + created + separator
        let content = 1 + body.len() + usize::from(clipped) + 1;
        let height = content.max(AVATAR_ROWS as usize) + 1;
        u16::try_from(height).unwrap_or(u16::MAX)
    }

    fn bind(&self, row: &mut RowContent, width: u16) {
        row.clear();
        if Self::text_width(width) == 0 {
            return;
        }
        row.item = Some(self.id);
        row.avatar = Some(self.avatar.clone()).filter(|a| !a.is_empty());

        let (body, clipped) = self.body_lines(width);
        row.lines.push(RowLine::Header {
            author: self.author.clone(),
            rating: self.rating,
        });
        row.lines.extend(body.into_iter().map(RowLine::Body));
        if clipped {
            row.lines.push(RowLine::ShowMore);
        }
        row.lines.push(RowLine::Created(self.created.clone()));
        while row.lines.len() < AVATAR_ROWS as usize {
            row.lines.push(RowLine::Blank);
        }
        row.lines.push(RowLine::Blank);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub id: ItemId,
    pub total_count: usize,
    pub label: String,
}

impl SummaryItem {
    pub fn new(id: ItemId, total_count: usize, pluralizer: &dyn Pluralizer) -> Self {
        Self {
            id,
            total_count,
            label: pluralizer.pluralize(total_count),
        }
    }

    fn measure(&self, width: u16) -> u16 {
        let lines = wrap_by_width(&self.label, width as usize).len();
        if lines == 0 {
            return 0;
        }
        u16::try_from(lines + 1).unwrap_or(u16::MAX)
    }

    fn bind(&self, row: &mut RowContent, width: u16) {
        row.clear();
        let lines = wrap_by_width(&self.label, width as usize);
        if lines.is_empty() {
            return;
        }
        row.item = Some(self.id);
        row.lines.extend(lines.into_iter().map(RowLine::Summary));
        row.lines.push(RowLine::Blank);
    }
}

/// A row of the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Review(ReviewItem),
    Summary(SummaryItem),
}

impl ListItem {
    #[cfg(test)]
    pub fn id(&self) -> ItemId {
        match self {
            Self::Review(review) => review.id,
            Self::Summary(summary) => summary.id,
        }
    }

    /// Height in terminal rows when laid out `width` columns wide.
    pub fn measure(&self, width: u16) -> u16 {
        match self {
            Self::Review(review) => review.measure(width),
            Self::Summary(summary) => summary.measure(width),
        }
    }

    /// Fill `row` with this item's content; the line count always equals
    /// [`measure`](Self::measure) for the same width.
    pub fn bind(&self, row: &mut RowContent, width: u16) {
        match self {
            Self::Review(review) => review.bind(row, width),
            Self::Summary(summary) => summary.bind(row, width),
        }
    }

    pub fn as_review(&self) -> Option<&ReviewItem> {
        match self {
            Self::Review(review) => Some(review),
            Self::Summary(_) => None,
        }
    }

    pub(super) fn as_review_mut(&mut self) -> Option<&mut ReviewItem> {
        match self {
            Self::Review(review) => Some(review),
            Self::Summary(_) => None,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}
