//! Console state owned by the render loop.

use std::collections::HashSet;

use crate::registry::SnapshotRecord;

use super::focus::FocusController;

/// Fixed column labels for the snapshot table.
pub const TABLE_HEADERS: [&str; 6] = ["Delete", "Rollback", "Config", "ID", "Timestamp", "Description"];

/// Table selection state machine.
///
/// `Browsing` allows row navigation only; Enter arms `Selectable`, where the
/// two action cells can be activated. Activation returns to `Browsing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Browsing,
    Selectable,
}

/// The two activatable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionColumn {
    #[default]
    Delete,
    Rollback,
}

impl ActionColumn {
    pub fn other(&self) -> ActionColumn {
        match self {
            ActionColumn::Delete => ActionColumn::Rollback,
            ActionColumn::Rollback => ActionColumn::Delete,
        }
    }
}

/// Fields of the input form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Config,
    Name,
    Create,
    Quit,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Config => FormField::Name,
            FormField::Name => FormField::Create,
            FormField::Create => FormField::Quit,
            FormField::Quit => FormField::Config,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Config => FormField::Quit,
            FormField::Name => FormField::Config,
            FormField::Create => FormField::Name,
            FormField::Quit => FormField::Create,
        }
    }
}

/// Status line content, styled red when it reports an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub error: bool,
}

/// Main console state.
#[derive(Debug)]
pub struct AppState {
    /// Configuration identifiers, enumerated once at startup.
    pub configs: Vec<String>,
    /// Index of the selected configuration.
    pub selected_config: usize,
    /// Rows last copied out of the registry.
    pub rows: Vec<SnapshotRecord>,
    /// Configuration the rows belong to. Rendering shows only the header
    /// while this differs from the selected configuration, so a switch never
    /// displays a mix of old and new rows.
    pub rows_config: Option<String>,
    /// Table selection mode.
    pub selection_mode: SelectionMode,
    /// Cursor row in the table.
    pub selected_row: usize,
    /// Armed action column.
    pub selected_column: ActionColumn,
    /// Focus ring over table and form.
    pub focus: FocusController,
    /// Field holding focus while the form has focus.
    pub form_field: FormField,
    /// Description for the next created snapshot.
    pub name_input: String,
    /// Action cells activated this refresh cycle, keyed by (snapshot id,
    /// column). Marked red as dispatch feedback, cleared on refresh.
    pub activated: HashSet<(String, ActionColumn)>,
    /// Status line, persistent until replaced.
    pub status: Option<StatusLine>,
    /// Mirror of the staleness flag for the header indicator.
    pub refreshing: bool,
}

impl AppState {
    pub fn new(configs: Vec<String>) -> Self {
        Self {
            configs,
            selected_config: 0,
            rows: Vec::new(),
            rows_config: None,
            selection_mode: SelectionMode::Browsing,
            selected_row: 0,
            selected_column: ActionColumn::Delete,
            focus: FocusController::default(),
            form_field: FormField::Config,
            name_input: String::new(),
            activated: HashSet::new(),
            status: None,
            refreshing: true,
        }
    }

    /// The currently selected configuration.
    pub fn active_config(&self) -> &str {
        &self.configs[self.selected_config]
    }

    /// Rows to render: the registry copy, but only while it belongs to the
    /// selected configuration.
    pub fn visible_rows(&self) -> &[SnapshotRecord] {
        if self.rows_config.as_deref() == Some(self.active_config()) {
            &self.rows
        } else {
            &[]
        }
    }

    /// Installs a fresh registry copy and reconciles the cursor.
    pub fn apply_refresh(&mut self, config: String, rows: Vec<SnapshotRecord>) {
        self.rows = rows;
        self.rows_config = Some(config);
        self.activated.clear();
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_row = 0;
            self.selection_mode = SelectionMode::Browsing;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    /// Moves the table cursor up.
    pub fn select_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Moves the table cursor down.
    pub fn select_down(&mut self) {
        let len = self.visible_rows().len();
        if len > 0 && self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    /// The record under the cursor, if any.
    pub fn selected_record(&self) -> Option<&SnapshotRecord> {
        self.visible_rows().get(self.selected_row)
    }

    /// Cycles the configuration selector. Returns the newly selected
    /// configuration when the selection actually changed.
    pub fn cycle_config(&mut self, forward: bool) -> Option<String> {
        if self.configs.len() < 2 {
            return None;
        }
        let len = self.configs.len();
        self.selected_config = if forward {
            (self.selected_config + 1) % len
        } else {
            (self.selected_config + len - 1) % len
        };
        self.selected_row = 0;
        self.selection_mode = SelectionMode::Browsing;
        Some(self.active_config().to_string())
    }

    /// Marks an action cell as dispatched.
    pub fn activate(&mut self, id: &str, column: ActionColumn) {
        self.activated.insert((id.to_string(), column));
    }

    /// Whether an action cell was activated this refresh cycle.
    pub fn is_activated(&self, id: &str, column: ActionColumn) -> bool {
        self.activated.contains(&(id.to_string(), column))
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            error: true,
        });
    }
}
