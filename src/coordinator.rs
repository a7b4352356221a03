//! Background refresh loop for the snapshot registry.
//!
//! One coordinator runs per selected configuration. On each tick it consumes
//! the shared staleness flag; when it was set, it lists snapshots through the
//! gateway, replaces the registry, and posts a redraw event. The flag is
//! taken before the listing starts, so a set that lands while a listing is
//! in flight stays set and is served on the next tick.
//!
//! Switching configurations stops the old coordinator before spawning the
//! new one. A stopped coordinator that is still blocked inside a gateway
//! call re-checks cancellation afterwards and exits, putting back the flag
//! it consumed so the replacement coordinator refreshes immediately.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::gateway::Gateway;
use crate::registry::SharedRegistry;
use crate::tui::Event;

/// Handle to a running refresh loop.
pub struct Coordinator {
    config: String,
    cancel_tx: Sender<()>,
}

impl Coordinator {
    /// Spawns a refresh loop for `config`.
    ///
    /// The loop checks the staleness flag immediately, then once per
    /// `interval`. It exits when cancelled or when the event channel closes.
    pub fn spawn(
        gateway: Arc<dyn Gateway>,
        registry: SharedRegistry,
        stale: Arc<AtomicBool>,
        config: String,
        interval: Duration,
        events: Sender<Event>,
    ) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let loop_config = config.clone();
        thread::spawn(move || {
            run_loop(gateway, registry, stale, loop_config, interval, events, cancel_rx);
        });
        Self { config, cancel_tx }
    }

    /// The configuration this coordinator refreshes.
    pub fn config(&self) -> &str {
        &self.config
    }

    /// Signals the loop to stop. Wakes it from its poll sleep; if it is
    /// blocked in a gateway call, it exits right after without any further
    /// effect on shared state.
    pub fn stop(&self) {
        let _ = self.cancel_tx.send(());
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        let _ = self.cancel_tx.send(());
    }
}

fn cancelled(cancel_rx: &Receiver<()>) -> bool {
    !matches!(cancel_rx.try_recv(), Err(TryRecvError::Empty))
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    gateway: Arc<dyn Gateway>,
    registry: SharedRegistry,
    stale: Arc<AtomicBool>,
    config: String,
    interval: Duration,
    events: Sender<Event>,
    cancel_rx: Receiver<()>,
) {
    debug!(config = %config, "refresh coordinator started");
    loop {
        // Consume the flag before listing: a set that lands mid-listing
        // survives and triggers the next tick instead of being clobbered.
        if stale.swap(false, Ordering::AcqRel) {
            match gateway.list_snapshots(&config) {
                Ok(records) => {
                    if cancelled(&cancel_rx) {
                        stale.store(true, Ordering::Release);
                        break;
                    }
                    debug!(config = %config, count = records.len(), "registry refreshed");
                    registry.replace(&config, records);
                    if events.send(Event::Refreshed {
                        config: config.clone(),
                    })
                    .is_err()
                    {
                        break;
                    }
                }
                Err(err) => {
                    if cancelled(&cancel_rx) {
                        stale.store(true, Ordering::Release);
                        break;
                    }
                    warn!(config = %config, error = %err, "snapshot listing failed");
                    // Put the flag back: the next tick retries.
                    stale.store(true, Ordering::Release);
                    if events.send(Event::RefreshFailed {
                        config: config.clone(),
                        message: err.to_string(),
                    })
                    .is_err()
                    {
                        break;
                    }
                }
            }
        }

        match cancel_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    debug!(config = %config, "refresh coordinator stopped");
}
