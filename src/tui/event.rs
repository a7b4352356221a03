//! Event handling for the console.
//!
//! A separate thread polls for terminal events and timer ticks; background
//! tasks (refresh coordinator, action workers) feed the same channel, so the
//! render loop consumes everything from one place and UI state is only ever
//! touched on the render thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Kind of snapshot action dispatched from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Delete,
    Rollback,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Delete => "delete",
            ActionKind::Rollback => "rollback",
        }
    }
}

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for periodic redraw.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
    /// The coordinator replaced the registry for `config`.
    Refreshed { config: String },
    /// A refresh attempt failed; the registry keeps its last good value.
    RefreshFailed { config: String, message: String },
    /// A create/delete/rollback worker finished.
    ActionFinished {
        action: ActionKind,
        config: String,
        error: Option<String>,
    },
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Event::Key(key),
                            CrosstermEvent::Resize(_, _) => Event::Resize,
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else {
                    // Timeout - send tick
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// Returns a sender for background tasks to post events.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
