//! Card grid layout in content coordinates.
//!
//! Sections are stacked vertically; each section has a header followed by
//! its cards laid out row-major in `columns` columns. Positions are measured
//! in terminal lines from the top of the scrollable content, independent of
//! the current scroll offset.

use crate::card::CardRef;
use crate::navigator::Grouping;

/// Height of one card, borders included.
pub const CARD_HEIGHT: usize = 5;
/// Header lines above each section (title + spacer).
pub const SECTION_HEADER_HEIGHT: usize = 2;

/// Element handle bound into the navigator for each rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// First content line of the card.
    pub top: usize,
    pub height: usize,
}

/// Display data for a single card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Identity and title; the id is what the navigator selects.
    pub card: CardRef,
    /// Small label above the title (e.g. `PROJECT`, a date).
    pub kicker: String,
    pub subtitle: Option<String>,
    /// Short chips rendered on the last line.
    pub badges: Vec<String>,
    /// Highlighted chip (e.g. `RECOMMENDED`, `LIVE`).
    pub accent: Option<String>,
}

impl CardView {
    pub fn new(card: CardRef, kicker: impl Into<String>) -> Self {
        Self {
            card,
            kicker: kicker.into(),
            subtitle: None,
            badges: Vec::new(),
            accent: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.card.id
    }
}

/// A titled group of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: String,
    pub title: String,
    pub grouping: Grouping,
    pub cards: Vec<CardView>,
}

/// A card with its computed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCard {
    pub section: usize,
    pub card: usize,
    pub grouping: Grouping,
    pub slot: CardSlot,
    pub column: usize,
}

/// Result of [`layout`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridLayout {
    /// First content line of each section header.
    pub section_tops: Vec<usize>,
    pub cards: Vec<PlacedCard>,
    pub total_height: usize,
}

/// Lays out `sections` in `columns` columns.
pub fn layout(sections: &[Section], columns: usize) -> GridLayout {
    let columns = columns.max(1);
    let mut out = GridLayout::default();
    let mut y = 0;

    for (si, section) in sections.iter().enumerate() {
        out.section_tops.push(y);
        y += SECTION_HEADER_HEIGHT;

        for (ci, _) in section.cards.iter().enumerate() {
            let row = ci / columns;
            out.cards.push(PlacedCard {
                section: si,
                card: ci,
                grouping: section.grouping,
                slot: CardSlot {
                    top: y + row * CARD_HEIGHT,
                    height: CARD_HEIGHT,
                },
                column: ci % columns,
            });
        }
        let rows = section.cards.len().div_ceil(columns);
        y += rows * CARD_HEIGHT;
        if si + 1 < sections.len() {
            y += 1;
        }
    }
    out.total_height = y;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(grouping: Grouping, n: usize) -> Section {
        Section {
            label: String::new(),
            title: String::new(),
            grouping,
            cards: (0..n)
                .map(|i| CardView::new(CardRef::new(format!("c{i}"), "t"), ""))
                .collect(),
        }
    }

    #[test]
    fn test_single_section_two_columns() {
        let l = layout(&[section(Grouping::All, 3)], 2);
        assert_eq!(l.section_tops, [0]);
        let tops: Vec<_> = l.cards.iter().map(|c| (c.slot.top, c.column)).collect();
        assert_eq!(tops, [(2, 0), (2, 1), (7, 0)]);
        assert_eq!(l.total_height, 2 + 2 * CARD_HEIGHT);
    }

    #[test]
    fn test_sections_stack_with_gap() {
        let l = layout(
            &[section(Grouping::Recommended, 2), section(Grouping::All, 2)],
            1,
        );
        assert_eq!(l.section_tops, [0, 2 + 2 * CARD_HEIGHT + 1]);
        assert_eq!(l.cards[2].grouping, Grouping::All);
        assert_eq!(l.cards[2].slot.top, l.section_tops[1] + SECTION_HEADER_HEIGHT);
    }

    #[test]
    fn test_empty_sections() {
        let l = layout(&[], 2);
        assert_eq!(l.total_height, 0);
        let l = layout(&[section(Grouping::All, 0)], 0);
        assert_eq!(l.total_height, SECTION_HEADER_HEIGHT);
        assert!(l.cards.is_empty());
    }
}
