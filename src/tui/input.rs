//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::focus::Region;
use super::state::{ActionColumn, AppState, FormField, SelectionMode};

/// Result of handling a key event, executed by the application loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the console.
    Quit,
    /// Create a snapshot with the typed description.
    Create { config: String, description: String },
    /// Delete the snapshot with the given id.
    Delete { config: String, id: String },
    /// Roll filesystem content back to the given snapshot.
    Rollback { config: String, id: String },
    /// The configuration selector moved; restart the refresh loop.
    SwitchConfig { config: String },
}

/// Handles key input and updates state.
///
/// Focus navigation keys are intercepted first; everything else goes to the
/// region currently holding focus.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Tab => {
            state.focus.next();
            return KeyAction::None;
        }
        KeyCode::BackTab => {
            state.focus.prev();
            return KeyAction::None;
        }
        _ => {}
    }

    match state.focus.current() {
        Region::Table => handle_table_key(state, key),
        Region::Form => handle_form_key(state, key),
    }
}

fn handle_table_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match state.selection_mode {
        SelectionMode::Browsing => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_up();
                KeyAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_down();
                KeyAction::None
            }
            KeyCode::Enter => {
                if state.selected_record().is_some() {
                    state.selection_mode = SelectionMode::Selectable;
                }
                KeyAction::None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        },
        SelectionMode::Selectable => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_up();
                KeyAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_down();
                KeyAction::None
            }
            KeyCode::Left | KeyCode::Right => {
                state.selected_column = state.selected_column.other();
                KeyAction::None
            }
            KeyCode::Esc => {
                state.selection_mode = SelectionMode::Browsing;
                KeyAction::None
            }
            KeyCode::Enter => activate_cell(state),
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        },
    }
}

/// Dispatches the armed action cell and drops back to browsing.
fn activate_cell(state: &mut AppState) -> KeyAction {
    let Some(record) = state.selected_record() else {
        state.selection_mode = SelectionMode::Browsing;
        return KeyAction::None;
    };
    let config = record.config.clone();
    let id = record.id.clone();
    let column = state.selected_column;

    state.activate(&id, column);
    state.selection_mode = SelectionMode::Browsing;

    match column {
        ActionColumn::Delete => KeyAction::Delete { config, id },
        ActionColumn::Rollback => KeyAction::Rollback { config, id },
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Up => {
            state.form_field = state.form_field.prev();
            return KeyAction::None;
        }
        KeyCode::Down => {
            state.form_field = state.form_field.next();
            return KeyAction::None;
        }
        _ => {}
    }

    match state.form_field {
        FormField::Config => match key.code {
            KeyCode::Left => switch_config(state, false),
            KeyCode::Right | KeyCode::Enter => switch_config(state, true),
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        },
        FormField::Name => match key.code {
            KeyCode::Char(c) => {
                state.name_input.push(c);
                KeyAction::None
            }
            KeyCode::Backspace => {
                state.name_input.pop();
                KeyAction::None
            }
            _ => KeyAction::None,
        },
        FormField::Create => match key.code {
            KeyCode::Enter => KeyAction::Create {
                config: state.active_config().to_string(),
                description: state.name_input.clone(),
            },
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        },
        FormField::Quit => match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        },
    }
}

fn switch_config(state: &mut AppState, forward: bool) -> KeyAction {
    match state.cycle_config(forward) {
        Some(config) => KeyAction::SwitchConfig { config },
        None => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SnapshotRecord;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn record(id: &str) -> SnapshotRecord {
        SnapshotRecord {
            config: "root".to_string(),
            id: id.to_string(),
            timestamp: "2026-02-07 17:00:00".to_string(),
            description: "init".to_string(),
        }
    }

    fn table_state() -> AppState {
        let mut state = AppState::new(vec!["root".to_string(), "home".to_string()]);
        state.apply_refresh("root".to_string(), vec![record("1"), record("2")]);
        state.focus.next(); // Form -> Table
        assert_eq!(state.focus.current(), Region::Table);
        state
    }

    #[test]
    fn tab_cycles_focus_from_any_region() {
        let mut state = AppState::new(vec!["root".to_string()]);
        assert_eq!(state.focus.current(), Region::Form);
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus.current(), Region::Table);
        handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(state.focus.current(), Region::Form);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = table_state();
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(&mut state, event), KeyAction::Quit);
    }

    #[test]
    fn browsing_arrows_move_cursor_only() {
        let mut state = table_state();
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.selected_row, 1);
        assert_eq!(state.selection_mode, SelectionMode::Browsing);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn enter_arms_selectable_mode() {
        let mut state = table_state();
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.selection_mode, SelectionMode::Selectable);
    }

    #[test]
    fn enter_on_empty_table_stays_browsing() {
        let mut state = table_state();
        state.apply_refresh("root".to_string(), vec![]);
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.selection_mode, SelectionMode::Browsing);
    }

    #[test]
    fn activation_dispatches_delete_and_returns_to_browsing() {
        let mut state = table_state();
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Enter));
        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            action,
            KeyAction::Delete {
                config: "root".to_string(),
                id: "2".to_string()
            }
        );
        assert_eq!(state.selection_mode, SelectionMode::Browsing);
        assert!(state.is_activated("2", ActionColumn::Delete));
    }

    #[test]
    fn right_arms_rollback_column() {
        let mut state = table_state();
        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Right));
        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            action,
            KeyAction::Rollback {
                config: "root".to_string(),
                id: "1".to_string()
            }
        );
        assert!(state.is_activated("1", ActionColumn::Rollback));
    }

    #[test]
    fn esc_leaves_selectable_without_dispatch() {
        let mut state = table_state();
        handle_key(&mut state, key(KeyCode::Enter));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert_eq!(state.selection_mode, SelectionMode::Browsing);
        assert!(state.activated.is_empty());
    }

    #[test]
    fn config_selector_returns_switch_action() {
        let mut state = AppState::new(vec!["root".to_string(), "home".to_string()]);
        let action = handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(
            action,
            KeyAction::SwitchConfig {
                config: "home".to_string()
            }
        );
    }

    #[test]
    fn typed_name_feeds_create_action() {
        let mut state = AppState::new(vec!["root".to_string()]);
        handle_key(&mut state, key(KeyCode::Down)); // Config -> Name
        for c in "backup".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.name_input, "backu");

        handle_key(&mut state, key(KeyCode::Down)); // Name -> Create
        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            action,
            KeyAction::Create {
                config: "root".to_string(),
                description: "backu".to_string()
            }
        );
    }

    #[test]
    fn q_in_name_field_is_typed_not_quit() {
        let mut state = AppState::new(vec!["root".to_string()]);
        handle_key(&mut state, key(KeyCode::Down)); // Config -> Name
        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert_eq!(state.name_input, "q");
    }

    #[test]
    fn quit_button_quits() {
        let mut state = AppState::new(vec!["root".to_string()]);
        handle_key(&mut state, key(KeyCode::Up)); // Config -> Quit (wrap)
        assert_eq!(state.form_field, FormField::Quit);
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }
}
