//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const ACCENT: Color = Color::Cyan;
    pub const BADGE: Color = Color::Yellow;
    pub const LIVE: Color = Color::Green;
    pub const ERROR: Color = Color::Red;

    pub const NAV_ACTIVE: Color = Color::Cyan;
    pub const NAV_INACTIVE: Color = Color::DarkGray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of the selected card.
    pub fn card_selected() -> Style {
        Style::default()
            .fg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of an unselected card.
    pub fn card_border() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Title line inside the selected card.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Section label (`RECOMMENDED`, `ALL`).
    pub fn section_label() -> Style {
        Style::default()
            .fg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge() -> Style {
        Style::default().fg(Theme::BADGE)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Theme::LIVE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Theme::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Active navigation entry.
    pub fn nav_active() -> Style {
        Style::default()
            .fg(Theme::NAV_ACTIVE)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive navigation entry.
    pub fn nav_inactive() -> Style {
        Style::default().fg(Theme::NAV_INACTIVE).bg(Theme::HEADER_BG)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Key name in help and hint lines.
    pub fn key() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
