//! Header bar showing the active configuration and refresh state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Title
        Constraint::Min(20),    // Active configuration
        Constraint::Length(14), // Refresh state
    ])
    .split(area);

    let title = Paragraph::new(" snapcon ").style(Styles::header());
    frame.render_widget(title, chunks[0]);

    let config = Paragraph::new(format!(" config: {} ", state.active_config()))
        .style(Styles::header());
    frame.render_widget(config, chunks[1]);

    let refresh = if state.refreshing { " REFRESHING " } else { " LIVE " };
    frame.render_widget(Paragraph::new(refresh).style(Styles::header()), chunks[2]);
}
