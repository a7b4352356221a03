//! Terminal console for snapper snapshots.
//!
//! Renders the snapshot registry as a selectable table next to an input
//! form, and dispatches operator actions back through the gateway.

mod app;
mod event;
mod focus;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use event::{ActionKind, Event, EventHandler};
pub use focus::{FocusController, Region};
pub use state::{ActionColumn, AppState, FormField, SelectionMode, StatusLine};
