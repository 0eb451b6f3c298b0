//! Scroll state of the card grid.
//!
//! Implements [`ViewportSink`] for [`CardSlot`] handles: the navigator asks it
//! to focus a card and to scroll that card into view. Smooth scrolls move the
//! offset one line per tick toward the target.

use crate::navigator::{FocusOptions, ScrollBehavior, ScrollBlock, ScrollOptions, ViewportSink};

use super::layout::CardSlot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridViewport {
    /// First visible content line.
    pub offset: usize,
    /// Where a smooth scroll is heading, if one is in flight.
    pub target: Option<usize>,
    /// Visible lines.
    pub height: usize,
    /// Content lines.
    pub content_height: usize,
    /// Card that last received focus.
    pub focused: Option<CardSlot>,
}

impl GridViewport {
    /// Updates the geometry from the latest render and clamps offsets.
    pub fn set_geometry(&mut self, height: usize, content_height: usize) {
        self.height = height;
        self.content_height = content_height;
        self.offset = self.clamp(self.offset);
        self.target = self.target.map(|t| self.clamp(t));
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.max_offset())
    }

    /// Offset that makes `slot` visible according to `block`.
    fn offset_for(&self, slot: &CardSlot, block: ScrollBlock) -> usize {
        let wanted = match block {
            ScrollBlock::Start => slot.top,
            ScrollBlock::Nearest => {
                let bottom = slot.top + slot.height;
                if slot.top < self.offset {
                    slot.top
                } else if self.height > 0 && bottom > self.offset + self.height {
                    // Cards taller than the viewport align to their top.
                    bottom.saturating_sub(self.height).min(slot.top)
                } else {
                    self.offset
                }
            }
        };
        self.clamp(wanted)
    }

    /// Advances an in-flight smooth scroll by one line.
    ///
    /// Returns `true` while the animation is still running.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if self.offset < target {
            self.offset += 1;
        } else if self.offset > target {
            self.offset -= 1;
        }
        if self.offset == target {
            self.target = None;
        }
        self.target.is_some()
    }

    /// Scrolls by `delta` lines immediately (mouse wheel), cancelling animation.
    pub fn scroll_by(&mut self, delta: isize) {
        self.target = None;
        self.offset = self.clamp(self.offset.saturating_add_signed(delta));
    }

    /// Back to the top with nothing focused.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.target = None;
        self.focused = None;
    }
}

impl ViewportSink<CardSlot> for GridViewport {
    fn focus(&mut self, handle: &CardSlot, options: FocusOptions) {
        self.focused = Some(*handle);
        if !options.prevent_scroll {
            self.target = None;
            self.offset = self.offset_for(handle, ScrollBlock::Nearest);
        }
    }

    fn scroll_into_view(&mut self, handle: &CardSlot, options: ScrollOptions) {
        let wanted = self.offset_for(handle, options.block);
        match options.behavior {
            ScrollBehavior::Instant => {
                self.target = None;
                self.offset = wanted;
            }
            ScrollBehavior::Smooth => {
                self.target = (wanted != self.offset).then_some(wanted);
            }
        }
    }
}
