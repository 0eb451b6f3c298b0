//! Keyboard/pointer selection over a card grid.
//!
//! [`GridNavigator`] owns a single selected index over an ordered card list
//! that is rendered as a grid with a caller-supplied column count. The index
//! changes through three channels:
//!
//! - keyboard moves ([`GridNavigator::move_selection`]): the only channel that
//!   focuses the selected element and scrolls it into view;
//! - pointer hover ([`GridNavigator::hover`]): ignored until the pointer has
//!   actually moved since mount ([`GridNavigator::pointer_moved`]);
//! - list replacement ([`GridNavigator::on_list_changed`]): resets to the
//!   first card.
//!
//! Focus and scroll go through a [`ViewportSink`], so the navigator itself
//! stays free of any rendering concerns.

use std::collections::HashMap;

use tracing::debug;

use crate::card::CardRef;

/// Directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Signed index delta for a grid with `columns` columns.
    pub fn delta(self, columns: usize) -> i64 {
        let columns = columns.max(1) as i64;
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up => -columns,
            Direction::Down => columns,
        }
    }
}

/// Input channel that produced the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Init,
    Keyboard,
    Hover,
    Reset,
}

/// Selection snapshot returned by every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Selected position; `None` exactly when the list is empty.
    pub index: Option<usize>,
    pub last_input: InputKind,
}

/// Rendered grouping a card element belongs to.
///
/// A card can be rendered twice (e.g. in a recommended strip and in the full
/// listing); the [`Grouping::All`] binding is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    Recommended,
    All,
}

impl Grouping {
    fn priority(self) -> u8 {
        match self {
            Grouping::All => 0,
            Grouping::Recommended => 1,
        }
    }
}

/// Options for [`ViewportSink::focus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
    /// The focus call itself must not scroll the viewport.
    pub prevent_scroll: bool,
}

/// Where the element should land after scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Scroll the minimum amount that makes the element fully visible.
    Nearest,
    /// Align the element with the top of the viewport.
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Options for [`ViewportSink::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub block: ScrollBlock,
    pub behavior: ScrollBehavior,
}

/// Rendering side that owns element handles of type `H`.
pub trait ViewportSink<H> {
    /// Gives input focus to the element.
    fn focus(&mut self, handle: &H, options: FocusOptions);

    /// Scrolls the element's container so the element becomes visible.
    fn scroll_into_view(&mut self, handle: &H, options: ScrollOptions);
}

/// Focus options used after a keyboard move.
pub const KEYBOARD_FOCUS: FocusOptions = FocusOptions {
    prevent_scroll: true,
};

/// Scroll options used after a keyboard move.
pub const KEYBOARD_SCROLL: ScrollOptions = ScrollOptions {
    block: ScrollBlock::Nearest,
    behavior: ScrollBehavior::Smooth,
};

/// Selection state machine over a card list.
///
/// `H` is the element handle type supplied through [`GridNavigator::bind`].
#[derive(Debug, Clone)]
pub struct GridNavigator<H> {
    cards: Vec<CardRef>,
    state: SelectionState,
    /// Set by the first pointer motion after mount; hover is ignored until then.
    hover_armed: bool,
    bindings: HashMap<String, Vec<(Grouping, H)>>,
}

impl<H> Default for GridNavigator<H> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<H> GridNavigator<H> {
    /// Creates a navigator in its initial state over `cards`.
    pub fn new(cards: Vec<CardRef>) -> Self {
        let mut nav = Self {
            cards: Vec::new(),
            state: SelectionState::default(),
            hover_armed: false,
            bindings: HashMap::new(),
        };
        nav.initialize(cards);
        nav
    }

    /// Mounts over `cards`: first card selected, [`InputKind::Init`], hover
    /// disarmed. No focus or scroll is requested.
    pub fn initialize(&mut self, cards: Vec<CardRef>) -> SelectionState {
        self.cards = cards;
        self.hover_armed = false;
        self.bindings.clear();
        self.state = SelectionState {
            index: self.first_index(),
            last_input: InputKind::Init,
        };
        self.state
    }

    /// Replaces the list: first card selected, [`InputKind::Reset`]. No focus or
    /// scroll is requested.
    pub fn on_list_changed(&mut self, cards: Vec<CardRef>) -> SelectionState {
        debug!(
            old_len = self.cards.len(),
            new_len = cards.len(),
            "card list changed, resetting selection"
        );
        self.cards = cards;
        self.bindings
            .retain(|id, _| self.cards.iter().any(|c| &c.id == id));
        self.state = SelectionState {
            index: self.first_index(),
            last_input: InputKind::Reset,
        };
        self.state
    }

    /// Moves the selection by `direction` on a grid of `columns` columns.
    ///
    /// Moves saturate at the list bounds. When the index changes, the selected
    /// card's element is focused (without scrolling) and then scrolled into the
    /// nearest visible position with smooth animation. Empty lists are a no-op.
    pub fn move_selection<S>(
        &mut self,
        direction: Direction,
        columns: usize,
        sink: &mut S,
    ) -> SelectionState
    where
        S: ViewportSink<H> + ?Sized,
    {
        let Some(current) = self.state.index else {
            return self.state;
        };
        let last = self.cards.len() as i64 - 1;
        let target = (current as i64 + direction.delta(columns)).clamp(0, last) as usize;

        self.state = SelectionState {
            index: Some(target),
            last_input: InputKind::Keyboard,
        };
        if target != current {
            self.reveal_selected(sink);
        }
        self.state
    }

    /// Records real pointer motion; arms [`GridNavigator::hover`].
    pub fn pointer_moved(&mut self) {
        self.hover_armed = true;
    }

    /// Whether pointer motion has been seen since mount.
    pub fn hover_armed(&self) -> bool {
        self.hover_armed
    }

    /// Selects the card with `id` in response to the pointer entering it.
    ///
    /// Ignored before any pointer motion and for ids not in the list. Never
    /// focuses or scrolls.
    pub fn hover(&mut self, id: &str) -> SelectionState {
        if !self.hover_armed {
            return self.state;
        }
        if let Some(pos) = self.position_of(id) {
            self.state = SelectionState {
                index: Some(pos),
                last_input: InputKind::Hover,
            };
        }
        self.state
    }

    /// The selected card, for the caller to navigate to.
    pub fn activate(&self) -> Option<&CardRef> {
        self.state.index.and_then(|i| self.cards.get(i))
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn cards(&self) -> &[CardRef] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the card with `id` is the selected one.
    pub fn is_selected(&self, id: &str) -> bool {
        self.activate().is_some_and(|c| c.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    // -----------------------------------------------------------------------
    // Element bindings
    // -----------------------------------------------------------------------

    /// Registers the element rendered for `id` in `grouping`, replacing any
    /// previous one for that pair.
    pub fn bind(&mut self, id: impl Into<String>, grouping: Grouping, handle: H) {
        let slots = self.bindings.entry(id.into()).or_default();
        slots.retain(|(g, _)| *g != grouping);
        slots.push((grouping, handle));
        slots.sort_by_key(|(g, _)| g.priority());
    }

    /// Drops the element for `id` in `grouping` (it unmounted).
    pub fn unbind(&mut self, id: &str, grouping: Grouping) {
        if let Some(slots) = self.bindings.get_mut(id) {
            slots.retain(|(g, _)| *g != grouping);
            if slots.is_empty() {
                self.bindings.remove(id);
            }
        }
    }

    /// Drops every element binding.
    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Focus/scroll target for `id`: the canonical binding when present.
    pub fn binding_for(&self, id: &str) -> Option<&H> {
        self.bindings
            .get(id)
            .and_then(|slots| slots.first())
            .map(|(_, h)| h)
    }

    fn reveal_selected<S>(&self, sink: &mut S)
    where
        S: ViewportSink<H> + ?Sized,
    {
        let Some(card) = self.activate() else {
            return;
        };
        match self.binding_for(&card.id) {
            Some(handle) => {
                sink.focus(handle, KEYBOARD_FOCUS);
                sink.scroll_into_view(handle, KEYBOARD_SCROLL);
            }
            None => debug!(id = %card.id, "no element bound for selected card"),
        }
    }

    fn first_index(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Focus(&'static str, FocusOptions),
        Scroll(&'static str, ScrollOptions),
    }

    #[derive(Default)]
    struct SpySink {
        calls: Vec<Call>,
    }

    impl ViewportSink<&'static str> for SpySink {
        fn focus(&mut self, handle: &&'static str, options: FocusOptions) {
            self.calls.push(Call::Focus(*handle, options));
        }
        fn scroll_into_view(&mut self, handle: &&'static str, options: ScrollOptions) {
            self.calls.push(Call::Scroll(*handle, options));
        }
    }

    const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn cards(n: usize) -> Vec<CardRef> {
        IDS[..n].iter().map(|id| CardRef::new(*id, *id)).collect()
    }

    /// Navigator over `n` cards with each card bound in the full listing.
    fn bound(n: usize) -> GridNavigator<&'static str> {
        let mut nav = GridNavigator::new(cards(n));
        for id in &IDS[..n] {
            nav.bind(*id, Grouping::All, *id);
        }
        nav
    }

    #[test]
    fn initialize_selects_first_without_side_effects() {
        let nav = bound(4);
        assert_eq!(
            nav.state(),
            SelectionState {
                index: Some(0),
                last_input: InputKind::Init
            }
        );
        assert!(!nav.hover_armed());
    }

    #[test]
    fn move_clamps_to_bounds() {
        let mut nav = bound(5);
        let mut sink = SpySink::default();

        for _ in 0..10 {
            let s = nav.move_selection(Direction::Down, 2, &mut sink);
            assert!(s.index.is_some_and(|i| i < 5));
        }
        assert_eq!(nav.state().index, Some(4));

        let calls_at_bottom = sink.calls.len();
        nav.move_selection(Direction::Down, 2, &mut sink);
        nav.move_selection(Direction::Right, 2, &mut sink);
        assert_eq!(nav.state().index, Some(4));
        assert_eq!(sink.calls.len(), calls_at_bottom);

        for _ in 0..10 {
            nav.move_selection(Direction::Up, 3, &mut sink);
        }
        assert_eq!(nav.state().index, Some(0));
        nav.move_selection(Direction::Left, 1, &mut sink);
        assert_eq!(nav.state().index, Some(0));
    }

    #[test]
    fn hover_never_scrolls() {
        let mut nav = bound(4);
        nav.pointer_moved();
        let s = nav.hover("c");
        assert_eq!(s.index, Some(2));
        assert_eq!(s.last_input, InputKind::Hover);
        // no sink was involved; a keyboard move afterwards is the first call
        let mut sink = SpySink::default();
        nav.move_selection(Direction::Left, 2, &mut sink);
        assert_eq!(sink.calls.len(), 2);
    }

    #[test]
    fn hover_ignored_before_pointer_motion() {
        let mut nav = bound(4);
        let s = nav.hover("c");
        assert_eq!(s.index, Some(0));
        assert_eq!(s.last_input, InputKind::Init);

        nav.pointer_moved();
        assert_eq!(nav.hover("c").index, Some(2));
    }

    #[test]
    fn hover_unknown_id_is_ignored() {
        let mut nav = bound(3);
        nav.pointer_moved();
        nav.hover("b");
        let s = nav.hover("zzz");
        assert_eq!(s.index, Some(1));
        assert_eq!(s.last_input, InputKind::Hover);
    }

    #[test]
    fn keyboard_move_focuses_then_scrolls_target() {
        let mut nav = bound(4);
        let mut sink = SpySink::default();

        let s = nav.move_selection(Direction::Down, 2, &mut sink);
        assert_eq!(s.index, Some(2));
        assert_eq!(s.last_input, InputKind::Keyboard);
        assert_eq!(
            sink.calls,
            [
                Call::Focus("c", KEYBOARD_FOCUS),
                Call::Scroll("c", KEYBOARD_SCROLL),
            ]
        );
        assert!(KEYBOARD_FOCUS.prevent_scroll);
        assert_eq!(KEYBOARD_SCROLL.block, ScrollBlock::Nearest);
        assert_eq!(KEYBOARD_SCROLL.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn list_change_resets_without_scroll() {
        let mut nav = bound(5);
        let mut sink = SpySink::default();
        nav.move_selection(Direction::Right, 1, &mut sink);
        nav.move_selection(Direction::Right, 1, &mut sink);
        nav.move_selection(Direction::Right, 1, &mut sink);
        assert_eq!(nav.state().index, Some(3));
        sink.calls.clear();

        let s = nav.on_list_changed(cards(3));
        assert_eq!(
            s,
            SelectionState {
                index: Some(0),
                last_input: InputKind::Reset
            }
        );
        assert!(sink.calls.is_empty());
        assert_eq!(nav.binding_for("d"), None);
        assert_eq!(nav.binding_for("a"), Some(&"a"));
    }

    #[test]
    fn empty_list_is_safe() {
        let mut nav: GridNavigator<&'static str> = GridNavigator::new(Vec::new());
        let mut sink = SpySink::default();
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let s = nav.move_selection(dir, 2, &mut sink);
            assert_eq!(s.index, None);
        }
        nav.pointer_moved();
        assert_eq!(nav.hover("a").index, None);
        assert!(nav.activate().is_none());
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn canonical_binding_wins() {
        let mut nav: GridNavigator<&'static str> = GridNavigator::new(cards(3));
        nav.bind("b", Grouping::Recommended, "rec-b");
        assert_eq!(nav.binding_for("b"), Some(&"rec-b"));

        nav.bind("b", Grouping::All, "all-b");
        assert_eq!(nav.binding_for("b"), Some(&"all-b"));

        nav.bind("b", Grouping::Recommended, "rec-b2");
        assert_eq!(nav.binding_for("b"), Some(&"all-b"));

        nav.unbind("b", Grouping::All);
        assert_eq!(nav.binding_for("b"), Some(&"rec-b2"));
        nav.unbind("b", Grouping::Recommended);
        assert_eq!(nav.binding_for("b"), None);
    }

    #[test]
    fn columns_read_per_move() {
        let mut nav = bound(5);
        let mut sink = SpySink::default();
        nav.move_selection(Direction::Down, 1, &mut sink);
        assert_eq!(nav.state().index, Some(1));
        nav.move_selection(Direction::Down, 2, &mut sink);
        assert_eq!(nav.state().index, Some(3));
        // zero columns is treated as one
        nav.move_selection(Direction::Up, 0, &mut sink);
        assert_eq!(nav.state().index, Some(2));
    }

    #[test]
    fn unbound_target_skips_side_effect() {
        let mut nav: GridNavigator<&'static str> = GridNavigator::new(cards(3));
        let mut sink = SpySink::default();
        nav.move_selection(Direction::Right, 1, &mut sink);
        assert_eq!(nav.state().index, Some(1));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn activate_returns_selected_card() {
        let mut nav = bound(3);
        nav.pointer_moved();
        nav.hover("c");
        assert_eq!(nav.activate().map(|c| c.id.as_str()), Some("c"));
        assert!(nav.is_selected("c"));
    }
}
