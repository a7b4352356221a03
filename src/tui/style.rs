//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Console color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const TABLE_HEADER: Color = Color::Yellow;
    pub const ACTIVATED: Color = Color::Red;
    pub const ERROR: Color = Color::Red;
    pub const FOCUS: Color = Color::Cyan;
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

    /// Table header row style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::TABLE_HEADER)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row or cell style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Dispatched action cell style.
    pub fn activated() -> Style {
        Style::default().fg(Theme::ACTIVATED)
    }

    /// Region or field holding input focus.
    pub fn focused() -> Style {
        Style::default().fg(Theme::FOCUS).add_modifier(Modifier::BOLD)
    }

    /// Error text in the status line.
    pub fn error() -> Style {
        Style::default().fg(Theme::ERROR).add_modifier(Modifier::BOLD)
    }

    /// De-emphasized text.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }
}
