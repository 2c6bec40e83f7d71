//! Dirty region tracking for the review screen.
//!
//! Background results arrive far more often than the screen changes, so the
//! main loop only draws when one of these flags is set. The flags use
//! [`Cell`] so that engine callbacks can share them through an `Rc`.

use std::cell::Cell;

/// Tracks which UI regions need to be redrawn.
#[derive(Debug, Default)]
pub struct DirtyFlags {
    /// Rows were added, removed or re-measured
    feed: Cell<bool>,
    /// Selection or scroll position moved
    selection: Cell<bool>,
    /// An avatar finished loading into a visible slot
    avatars: Cell<bool>,
    /// Loading indicator, error line or key sequence changed
    status: Cell<bool>,
    /// Terminal size has changed (forces full redraw)
    terminal_size: Cell<bool>,
    /// Force full redraw (initial render, popup closed)
    force_full: Cell<bool>,
    /// Last known terminal width
    last_width: Cell<u16>,
    /// Last known terminal height
    last_height: Cell<u16>,
}

impl DirtyFlags {
    /// Create new dirty flags with everything marked dirty (forces initial render)
    pub fn new() -> Self {
        Self {
            feed: Cell::new(true),
            selection: Cell::new(true),
            avatars: Cell::new(true),
            status: Cell::new(true),
            terminal_size: Cell::new(true),
            force_full: Cell::new(true),
            last_width: Cell::new(0),
            last_height: Cell::new(0),
        }
    }

    #[inline]
    pub fn mark_feed(&self) {
        self.feed.set(true);
    }

    #[inline]
    pub fn mark_selection(&self) {
        self.selection.set(true);
    }

    #[inline]
    pub fn mark_avatars(&self) {
        self.avatars.set(true);
    }

    #[inline]
    pub fn mark_status(&self) {
        self.status.set(true);
    }

    /// Force a full redraw of all regions
    #[inline]
    pub fn mark_full_redraw(&self) {
        self.force_full.set(true);
    }

    /// Check and update terminal size, marking dirty if changed
    #[inline]
    pub fn check_terminal_size(&self, width: u16, height: u16) {
        if width != self.last_width.get() || height != self.last_height.get() {
            self.terminal_size.set(true);
            self.last_width.set(width);
            self.last_height.set(height);
        }
    }

    /// Selection or scroll position moved since the last render
    #[inline]
    pub fn is_selection_dirty(&self) -> bool {
        self.selection.get()
    }

    /// Check if a full redraw is needed
    #[inline]
    pub fn needs_full_redraw(&self) -> bool {
        self.force_full.get() || self.terminal_size.get()
    }

    /// Check if any region is dirty (needs render)
    #[inline]
    pub fn any_dirty(&self) -> bool {
        self.needs_full_redraw()
            || self.feed.get()
            || self.selection.get()
            || self.avatars.get()
            || self.status.get()
    }

    /// Clear all dirty flags after render
    #[inline]
    pub fn clear_all(&self) {
        self.feed.set(false);
        self.selection.set(false);
        self.avatars.set(false);
        self.status.set(false);
        self.terminal_size.set(false);
        self.force_full.set(false);
    }
}
