//! Snapshot table widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::tui::focus::Region;
use crate::tui::state::{ActionColumn, AppState, SelectionMode, TABLE_HEADERS};
use crate::tui::style::Styles;

/// Renders the snapshot table. An empty or not-yet-refreshed set shows the
/// header row only.
pub fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = Row::new(
        TABLE_HEADERS
            .iter()
            .map(|title| Cell::from(Span::styled(*title, Styles::table_header()))),
    )
    .height(1);

    let rows: Vec<Row> = state
        .visible_rows()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let row_selected =
                state.focus.current() == Region::Table && idx == state.selected_row;
            let base = if row_selected && state.selection_mode == SelectionMode::Browsing {
                Styles::selected()
            } else {
                Styles::default()
            };

            let cells = vec![
                action_cell(state, record, idx, ActionColumn::Delete, "Delete"),
                action_cell(state, record, idx, ActionColumn::Rollback, "Rollback"),
                Cell::from(record.config.clone()),
                Cell::from(record.id.clone()),
                Cell::from(record.timestamp.clone()),
                Cell::from(record.description.clone()),
            ];
            Row::new(cells).style(base).height(1)
        })
        .collect();

    let border_style = if state.focus.current() == Region::Table {
        Styles::focused()
    } else {
        Styles::dim()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(26),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Snapshots ")
            .borders(Borders::ALL)
            .border_style(border_style),
    )
    .column_spacing(1);

    frame.render_widget(table, area);
}

/// Styles one of the two activatable cells: red once dispatched, highlighted
/// while armed in selectable mode.
fn action_cell<'a>(
    state: &AppState,
    record: &crate::registry::SnapshotRecord,
    row: usize,
    column: ActionColumn,
    label: &'a str,
) -> Cell<'a> {
    let armed = state.focus.current() == Region::Table
        && state.selection_mode == SelectionMode::Selectable
        && row == state.selected_row
        && column == state.selected_column;

    let style = if state.is_activated(&record.id, column) {
        Styles::activated()
    } else if armed {
        Styles::selected()
    } else {
        Style::default()
    };
    Cell::from(Span::styled(label, style))
}
