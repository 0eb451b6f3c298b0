//! Card references and the featured → order → title ordering.

use std::cmp::Ordering;

use crate::content::{PatchNoteLite, ProjectLite};

/// Sort position used when an entry declares no `order`.
pub const DEFAULT_ORDER: f64 = 999.0;

/// Entries that can be ranked featured-first, then by order, then by title.
pub trait Rankable {
    fn featured(&self) -> bool;
    fn order(&self) -> Option<f64>;
    fn title(&self) -> &str;
}

/// Featured first, then ascending order (missing = [`DEFAULT_ORDER`]), then
/// title. Orders compare with [`f64::total_cmp`] and titles case-insensitively
/// with a byte-order tiebreak, so the result is a total order.
pub fn rank_cmp<T: Rankable>(a: &T, b: &T) -> Ordering {
    b.featured()
        .cmp(&a.featured())
        .then_with(|| {
            a.order()
                .unwrap_or(DEFAULT_ORDER)
                .total_cmp(&b.order().unwrap_or(DEFAULT_ORDER))
        })
        .then_with(|| cmp_titles(a.title(), b.title()))
}

fn cmp_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A single selectable card in a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRef {
    /// Stable identifier (the content slug).
    pub id: String,
    /// Whether the card belongs to the featured group.
    pub group_featured: bool,
    pub order: Option<f64>,
    pub title: String,
}

impl CardRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group_featured: false,
            order: None,
            title: title.into(),
        }
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.group_featured = featured;
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }
}

impl Rankable for CardRef {
    fn featured(&self) -> bool {
        self.group_featured
    }
    fn order(&self) -> Option<f64> {
        self.order
    }
    fn title(&self) -> &str {
        &self.title
    }
}

impl From<&ProjectLite> for CardRef {
    fn from(p: &ProjectLite) -> Self {
        Self {
            id: p.slug.clone(),
            group_featured: p.featured,
            order: p.order,
            title: p.title.clone(),
        }
    }
}

impl From<&PatchNoteLite> for CardRef {
    fn from(n: &PatchNoteLite) -> Self {
        Self::new(n.slug.clone(), n.title.clone())
    }
}

/// Sorts cards in place with [`rank_cmp`]. The sort is stable.
pub fn sort_cards(cards: &mut [CardRef]) {
    cards.sort_by(rank_cmp);
}

/// Up to `limit` featured cards, in list order.
pub fn recommended(cards: &[CardRef], limit: usize) -> Vec<CardRef> {
    cards
        .iter()
        .filter(|c| c.group_featured)
        .take(limit)
        .cloned()
        .collect()
}
