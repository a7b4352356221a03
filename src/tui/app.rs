//! Main console application.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::coordinator::Coordinator;
use crate::gateway::{Gateway, GatewayError};
use crate::registry::{Registry, SharedRegistry};

use super::event::{ActionKind, Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Redraw tick; the refresh loop has its own poll interval.
const DRAW_TICK: Duration = Duration::from_millis(250);

/// Main console application.
///
/// Owns all UI state; background tasks only reach it through the shared
/// registry, the staleness flag, and the event channel.
pub struct App {
    gateway: Arc<dyn Gateway>,
    registry: SharedRegistry,
    stale: Arc<AtomicBool>,
    state: AppState,
    coordinator: Option<Coordinator>,
    poll_interval: Duration,
    should_quit: bool,
}

impl App {
    /// Creates the console for the given configurations. The registry starts
    /// stale so the first coordinator tick populates it.
    pub fn new(gateway: Arc<dyn Gateway>, configs: Vec<String>, poll_interval: Duration) -> Self {
        Self {
            gateway,
            registry: Arc::new(Registry::new()),
            stale: Arc::new(AtomicBool::new(true)),
            state: AppState::new(configs),
            coordinator: None,
            poll_interval,
            should_quit: false,
        }
    }

    /// Runs the console until quit.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(DRAW_TICK);
        self.start_coordinator(events.sender());

        // Main loop
        loop {
            self.state.refreshing = self.stale.load(Ordering::Acquire);
            terminal.draw(|frame| render(frame, &self.state))?;

            match events.next() {
                Ok(event) => self.on_event(event, events.sender()),
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn on_event(&mut self, event: Event, tx: Sender<Event>) {
        match event {
            Event::Tick | Event::Resize => {}
            Event::Key(key) => {
                let action = handle_key(&mut self.state, key);
                self.dispatch(action, tx);
            }
            Event::Refreshed { config } => self.on_refreshed(&config),
            Event::RefreshFailed { config, message } => {
                if config == self.state.active_config() {
                    self.state.set_error(format!("refresh failed: {}", message));
                }
            }
            Event::ActionFinished {
                action,
                config,
                error,
            } => match error {
                Some(message) => self
                    .state
                    .set_error(format!("{} failed: {}", action.label(), message)),
                None => self
                    .state
                    .set_status(format!("{} on {} done", action.label(), config)),
            },
        }
    }

    /// Copies the registry into the render state once the coordinator
    /// reports a refresh, so the redraw observes the post-replacement set.
    fn on_refreshed(&mut self, config: &str) {
        if config != self.state.active_config() {
            // Stale message from an abandoned coordinator.
            return;
        }
        let (registry_config, records) = self.registry.current();
        if registry_config.as_deref() == Some(config) {
            self.state.apply_refresh(config.to_string(), records);
            // A successful refresh supersedes any standing error banner.
            if self.state.status.as_ref().is_some_and(|s| s.error) {
                self.state.status = None;
            }
        }
    }

    fn dispatch(&mut self, action: KeyAction, tx: Sender<Event>) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SwitchConfig { config } => {
                info!(config = %config, "configuration switched");
                self.start_coordinator(tx);
            }
            KeyAction::Create {
                config,
                description,
            } => self.spawn_action(ActionKind::Create, config, tx, move |gateway, config| {
                gateway.create_snapshot(config, &description)
            }),
            KeyAction::Delete { config, id } => {
                self.spawn_action(ActionKind::Delete, config, tx, move |gateway, config| {
                    gateway.delete_snapshot(config, &id)
                })
            }
            KeyAction::Rollback { config, id } => {
                self.spawn_action(ActionKind::Rollback, config, tx, move |gateway, config| {
                    gateway.revert_snapshot(config, &id)
                })
            }
        }
    }

    /// Stops the previous coordinator, marks the registry stale, and spawns
    /// a fresh refresh loop for the selected configuration.
    fn start_coordinator(&mut self, tx: Sender<Event>) {
        if let Some(old) = self.coordinator.take() {
            old.stop();
        }
        self.stale.store(true, Ordering::Release);
        self.coordinator = Some(Coordinator::spawn(
            Arc::clone(&self.gateway),
            Arc::clone(&self.registry),
            Arc::clone(&self.stale),
            self.state.active_config().to_string(),
            self.poll_interval,
            tx,
        ));
    }

    /// Runs a gateway mutation on a short-lived worker thread. Create and
    /// delete mark the registry stale on success; rollback is content-only
    /// and leaves the snapshot set untouched.
    fn spawn_action<F>(&self, action: ActionKind, config: String, tx: Sender<Event>, f: F)
    where
        F: FnOnce(&dyn Gateway, &str) -> Result<(), GatewayError> + Send + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        let stale = Arc::clone(&self.stale);
        thread::spawn(move || {
            let result = f(gateway.as_ref(), &config);
            if result.is_ok() && action != ActionKind::Rollback {
                stale.store(true, Ordering::Release);
            }
            let _ = tx.send(Event::ActionFinished {
                action,
                config,
                error: result.err().map(|e| e.to_string()),
            });
        });
    }
}
