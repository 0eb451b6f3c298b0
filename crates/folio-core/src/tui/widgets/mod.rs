//! TUI widgets for folio.

pub mod detail_common;
mod grid;
mod header;
mod help;
mod home;
mod patch_detail;
mod project_detail;
mod quit_confirm;

pub use grid::render_grid;
pub use header::{render_footer, render_header};
pub use help::render_help;
pub use home::render_home;
pub use patch_detail::render_patch_detail;
pub use project_detail::render_project_detail;
pub use quit_confirm::render_quit_confirm;
