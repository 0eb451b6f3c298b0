//! folio-core: shared library for the folio portfolio browser.
//!
//! Provides:
//! - `content` - front-matter loading for projects and patch notes
//! - `card` - card references and the featured/order/title ordering
//! - `navigator` - keyboard/pointer selection over a card grid
//! - `quest_log` - "Quest Log" list sections parsed into cards
//! - `last_seen` - persisted "last opened" marker
//! - `route` - screen addresses (`/contents/<slug>`, ...)
//! - `fmt` - shared text helpers
//!
//! With `tui` feature (default):
//! - `tui` - TUI rendering (ratatui/crossterm), state, input, widgets

pub mod card;
pub mod content;
pub mod fmt;
pub mod last_seen;
pub mod navigator;
pub mod quest_log;
pub mod route;

#[cfg(feature = "tui")]
pub mod tui;
