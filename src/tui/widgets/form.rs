//! Input form: configuration selector, snapshot name, create and quit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::focus::Region;
use crate::tui::state::{AppState, FormField};
use crate::tui::style::Styles;

/// Renders the input form.
pub fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let form_focused = state.focus.current() == Region::Form;
    let field_style = |field: FormField| {
        if form_focused && state.form_field == field {
            Styles::focused()
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Configuration: "),
            Span::styled(
                format!("< {} >", state.active_config()),
                field_style(FormField::Config),
            ),
        ]),
        Line::from(vec![
            Span::raw("Snapshot Name: "),
            Span::styled(
                format!("{}_", state.name_input),
                field_style(FormField::Name),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[ Create Snapshot ]",
            field_style(FormField::Create),
        )),
        Line::from(Span::styled("[ Quit ]", field_style(FormField::Quit))),
    ];

    let border_style = if form_focused {
        Styles::focused()
    } else {
        Styles::dim()
    };

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(" Input ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(form, area);
}
