//! snapcon — interactive console for snapper snapshots.
//!
//! Provides:
//! - `gateway` — snapper invocation and machine-readable output parsing
//! - `registry` — in-memory snapshot set for the active configuration
//! - `coordinator` — background refresh loop driven by a staleness flag
//! - `tui` — terminal console (ratatui/crossterm), state, input, widgets

pub mod coordinator;
pub mod gateway;
pub mod registry;
pub mod tui;
