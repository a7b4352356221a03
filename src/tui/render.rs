//! Main rendering logic for the console.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use super::state::{AppState, SelectionMode};
use super::style::Styles;
use super::widgets::{render_form, render_header, render_table};

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(7),    // Form + table
        Constraint::Length(1), // Status line
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    let body = Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(chunks[1]);
    render_form(frame, body[0], state);
    render_table(frame, body[1], state);

    render_status(frame, chunks[2], state);
}

/// Status line: last error or action outcome, otherwise key hints.
fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = match &state.status {
        Some(status) if status.error => {
            Paragraph::new(format!(" {} ", status.text)).style(Styles::error())
        }
        Some(status) => Paragraph::new(format!(" {} ", status.text)).style(Styles::default()),
        None => {
            let hint = match state.selection_mode {
                SelectionMode::Browsing => {
                    " Tab focus · ↑/↓ move · Enter select · q quit "
                }
                SelectionMode::Selectable => {
                    " ←/→ column · Enter activate · Esc back "
                }
            };
            Paragraph::new(hint).style(Styles::dim())
        }
    };
    frame.render_widget(status, area);
}
