//! Terminal user interface for browsing projects and patch notes.
//!
//! Screens follow [`crate::route::Route`]; every screen that shows cards
//! drives selection through a single [`crate::navigator::GridNavigator`].

mod app;
mod event;
mod input;
pub(crate) mod layout;
mod render;
pub(crate) mod state;
pub(crate) mod style;
pub(crate) mod viewport;
mod widgets;

pub use app::App;
