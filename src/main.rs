//! snapcon - interactive console for snapper snapshots.
//!
//! Renders the snapshot table for a selected snapper configuration, keeps it
//! in sync with the system through a background refresh loop, and dispatches
//! create/delete/rollback actions.
//!
//! Usage:
//!   snapcon              # 1 second refresh interval, real snapper
//!   snapcon 5            # 5 second refresh interval
//!   snapcon --mock       # canned in-memory snapper, no root required

use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snapcon::gateway::mock::MockRunner;
use snapcon::gateway::{Gateway, RealRunner, SnapperGateway};
use snapcon::tui::App;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Interactive console for snapper snapshots.
#[derive(Parser)]
#[command(name = "snapcon", about = "Snapper snapshot console")]
struct Args {
    /// Refresh poll interval in seconds (default: 1).
    #[arg(value_name = "INTERVAL")]
    interval: Option<u64>,

    /// Path to the snapper binary.
    #[arg(long, default_value = "snapper")]
    snapper_bin: String,

    /// Run against a canned in-memory snapper. No root needed.
    #[arg(long)]
    mock: bool,

    /// Skip the root privilege check.
    #[arg(long)]
    no_root_check: bool,

    /// Append logs to this file (stdout belongs to the console).
    /// Filtered via RUST_LOG.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Writes tracing output to a file; the terminal is taken by the TUI.
fn init_logging(path: &PathBuf) {
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error opening log file '{}': {}", path.display(), e);
            exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path);
    }

    // Snapper refuses most operations without root; fail before touching
    // the terminal rather than per-operation.
    let gateway: Arc<dyn Gateway> = if args.mock {
        Arc::new(SnapperGateway::new(MockRunner::typical_system()))
    } else {
        if !args.no_root_check && unsafe { libc::geteuid() } != 0 {
            eprintln!("snapcon must run as root (or pass --mock / --no-root-check)");
            exit(1);
        }
        Arc::new(SnapperGateway::new(RealRunner::new()).with_binary(args.snapper_bin))
    };

    // Configurations are enumerated once; without them there is no console.
    let configs = match gateway.list_configs() {
        Ok(configs) if !configs.is_empty() => configs,
        Ok(_) => {
            eprintln!("Error: snapper reported no configurations");
            exit(1);
        }
        Err(e) => {
            eprintln!("Error listing snapper configurations: {}", e);
            exit(1);
        }
    };

    let poll_interval = Duration::from_secs(args.interval.unwrap_or(1).max(1));
    let app = App::new(gateway, configs, poll_interval);

    if let Err(e) = app.run() {
        eprintln!("Error running TUI: {}", e);
        exit(1);
    }
}
