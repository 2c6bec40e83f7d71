//! Layout of the review list.
//!
//! Rows have different heights, so the screen keeps the measured height and
//! top line of every item from the last layout pass and scrolls in terminal
//! lines. Only rows intersecting the viewport are bound, each into a slot
//! from a pool that is reused from frame to frame; slot `n` is always the
//! `n`-th visible row. When scrolling moves a different item into a slot, the
//! slot's avatar request is replaced and any result for the old item is
//! dropped on arrival.

use crate::avatar::{AvatarDelivery, AvatarLoader, AvatarSlot, SlotId};
use crate::feed::{ListItem, RowContent, ScrollSignal};

/// One reusable display row.
#[derive(Debug, Clone)]
pub struct RowSlot {
    pub content: RowContent,
    pub avatar: AvatarSlot,
    /// Index of the bound item in the feed
    pub item_index: usize,
    /// Viewport line the first drawn line lands on
    pub y: u16,
    /// Lines of the row scrolled off above the viewport
    pub skip: u16,
}

impl RowSlot {
    fn new(id: SlotId) -> Self {
        Self {
            content: RowContent::default(),
            avatar: AvatarSlot::new(id),
            item_index: 0,
            y: 0,
            skip: 0,
        }
    }

    fn release(&mut self) {
        self.content.clear();
        self.avatar.clear();
    }
}

#[derive(Debug, Default)]
pub struct ReviewScreen {
    slots: Vec<RowSlot>,
    bound: usize,
    heights: Vec<u16>,
    tops: Vec<u32>,
    content_extent: u32,
    width: u16,
    height: u16,
    scroll: u32,
    selected: usize,
    /// Scroll the selected item into view on the next layout
    follow_selection: bool,
}

impl ReviewScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, used when the feed is refreshed
    pub fn reset(&mut self) {
        self.scroll = 0;
        self.selected = 0;
        self.follow_selection = false;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn scroll_offset(&self) -> u32 {
        self.scroll
    }

    /// Rows bound by the last [`update`](Self::update), top to bottom
    pub fn rows(&self) -> &[RowSlot] {
        &self.slots[..self.bound]
    }

    /// Lay out `items` in a `width` x `height` viewport and bind the rows
    /// that are visible.
    pub fn update(
        &mut self,
        items: &[ListItem],
        width: u16,
        height: u16,
        loader: &mut AvatarLoader,
    ) {
        self.layout(items, width, height);
        self.bind_visible(items, loader);
    }

    fn layout(&mut self, items: &[ListItem], width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.heights.clear();
        self.tops.clear();

        let mut top = 0u32;
        for item in items {
            let height = item.measure(width);
            self.tops.push(top);
            self.heights.push(height);
            top += u32::from(height);
        }
        self.content_extent = top;

        self.selected = self.selected.min(items.len().saturating_sub(1));
        if self.follow_selection && !items.is_empty() {
            self.scroll_to_selected();
            self.follow_selection = false;
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn bind_visible(&mut self, items: &[ListItem], loader: &mut AvatarLoader) {
        let view_top = self.scroll;
        let view_bottom = self.scroll + u32::from(self.height);
        let mut used = 0;

        if self.width > 0 && self.height > 0 {
            for (index, item) in items.iter().enumerate() {
                let top = self.tops[index];
                let height = u32::from(self.heights[index]);
                if height == 0 || top + height <= view_top {
                    continue;
                }
                if top >= view_bottom {
                    break;
                }

                if used == self.slots.len() {
                    self.slots.push(RowSlot::new(SlotId(used)));
                }
                let slot = &mut self.slots[used];
                item.bind(&mut slot.content, self.width);
                slot.item_index = index;
                slot.skip = clamp_u16(view_top.saturating_sub(top));
                slot.y = clamp_u16(top.saturating_sub(view_top));

                match slot.content.avatar.as_deref() {
                    Some(resource) => {
                        loader.request(resource, &mut slot.avatar);
                    }
                    None => slot.avatar.clear(),
                }
                used += 1;
            }
        }

        for slot in &mut self.slots[used..] {
            slot.release();
        }
        self.bound = used;
    }

    /// Hand finished avatar fetches to the slots. Returns whether any slot
    /// changed.
    pub fn deliver(&mut self, deliveries: &[AvatarDelivery]) -> bool {
        let mut changed = false;
        for delivery in deliveries {
            if let Some(slot) = self.slots.get_mut(delivery.slot.0) {
                changed |= slot.avatar.accept(delivery);
            }
        }
        changed
    }

    pub fn scroll_signal(&self) -> ScrollSignal {
        ScrollSignal {
            content_extent: self.content_extent,
            viewport_extent: u32::from(self.height),
            offset: self.scroll,
        }
    }

    fn max_scroll(&self) -> u32 {
        self.content_extent.saturating_sub(u32::from(self.height))
    }

    fn scroll_to_selected(&mut self) {
        let (Some(&top), Some(&height)) =
            (self.tops.get(self.selected), self.heights.get(self.selected))
        else {
            return;
        };
        let bottom = top + u32::from(height);
        let view = u32::from(self.height);

        if top < self.scroll || u32::from(height) >= view {
            self.scroll = top;
        } else if bottom > self.scroll + view {
            self.scroll = bottom - view;
        }
    }

    /// Item containing the first line of the viewport
    fn item_at_scroll(&self) -> usize {
        self.tops
            .partition_point(|&top| top <= self.scroll)
            .saturating_sub(1)
    }

    pub fn select_next(&mut self, len: usize) -> bool {
        if self.selected + 1 >= len {
            return false;
        }
        self.selected += 1;
        self.follow_selection = true;
        true
    }

    pub fn select_previous(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        self.follow_selection = true;
        true
    }

    pub fn page_down(&mut self, len: usize) {
        self.scroll = (self.scroll + u32::from(self.height)).min(self.max_scroll());
        self.selected = if self.scroll == self.max_scroll() {
            len.saturating_sub(1)
        } else {
            self.item_at_scroll()
        };
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(u32::from(self.height));
        self.selected = self.item_at_scroll();
    }

    pub fn go_to_top(&mut self) {
        self.scroll = 0;
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
        self.scroll = self.max_scroll();
        self.follow_selection = true;
    }
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
