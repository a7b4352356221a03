//! Gateway to the external snapper binary.
//!
//! Translates in-process calls into snapper invocations and parses the
//! machine-readable output into [`SnapshotRecord`]s. All calls block for the
//! duration of the external process, so they run on the refresh coordinator
//! or on short-lived action workers, never on the render thread.

pub mod mock;
mod parser;
mod runner;

pub use runner::{CommandOutput, CommandRunner, RealRunner};

use tracing::debug;

use crate::registry::SnapshotRecord;

/// Columns requested from `snapper list`, in order.
const LIST_COLUMNS: &str = "config,number,date,description";

/// Error types for snapper invocations.
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// The snapper process could not be started.
    Spawn(String),
    /// The process ran but exited non-zero.
    ExecutionFailed { command: String, detail: String },
    /// The output did not have the expected tabular shape.
    Parse(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Spawn(msg) => write!(f, "failed to run snapper: {}", msg),
            GatewayError::ExecutionFailed { command, detail } => {
                if detail.is_empty() {
                    write!(f, "{} failed", command)
                } else {
                    write!(f, "{} failed: {}", command, detail)
                }
            }
            GatewayError::Parse(msg) => write!(f, "unexpected snapper output: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Boundary to the external snapshot tool.
///
/// Object-safe so the TUI and the coordinator can share one
/// `Arc<dyn Gateway>` regardless of the underlying runner.
pub trait Gateway: Send + Sync {
    /// Lists configuration identifiers in tool-reported order.
    fn list_configs(&self) -> Result<Vec<String>, GatewayError>;

    /// Lists snapshots for one configuration, tool order preserved.
    fn list_snapshots(&self, config: &str) -> Result<Vec<SnapshotRecord>, GatewayError>;

    /// Creates a snapshot with the given description. The caller marks the
    /// registry stale after success.
    fn create_snapshot(&self, config: &str, description: &str) -> Result<(), GatewayError>;

    /// Deletes the snapshot with the given id.
    fn delete_snapshot(&self, config: &str, id: &str) -> Result<(), GatewayError>;

    /// Restores filesystem content to the state of `id` (undo `id..0`).
    /// Content-only: the snapshot set itself is unchanged.
    fn revert_snapshot(&self, config: &str, id: &str) -> Result<(), GatewayError>;
}

/// Gateway driving a snapper binary through a [`CommandRunner`].
pub struct SnapperGateway<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> SnapperGateway<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            binary: "snapper".to_string(),
        }
    }

    /// Overrides the snapper binary path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Runs snapper and maps spawn failures and non-zero exits to errors.
    fn run(&self, args: &[&str]) -> Result<CommandOutput, GatewayError> {
        debug!(binary = %self.binary, args = ?args, "running snapper");
        let output = self
            .runner
            .run(&self.binary, args)
            .map_err(|e| GatewayError::Spawn(e.to_string()))?;
        if !output.success {
            return Err(GatewayError::ExecutionFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                detail: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl<R: CommandRunner> Gateway for SnapperGateway<R> {
    fn list_configs(&self) -> Result<Vec<String>, GatewayError> {
        let output = self.run(&["--csvout", "list-configs", "--columns", "config"])?;
        let rows = parser::parse_table(&output.stdout, 1).map_err(GatewayError::Parse)?;
        Ok(rows.into_iter().map(|mut row| row.remove(0)).collect())
    }

    fn list_snapshots(&self, config: &str) -> Result<Vec<SnapshotRecord>, GatewayError> {
        let output = self.run(&["--csvout", "-c", config, "list", "--columns", LIST_COLUMNS])?;
        let rows = parser::parse_table(&output.stdout, 4).map_err(GatewayError::Parse)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let mut fields = row.into_iter();
                SnapshotRecord {
                    config: fields.next().unwrap_or_default(),
                    id: fields.next().unwrap_or_default(),
                    timestamp: fields.next().unwrap_or_default(),
                    description: fields.next().unwrap_or_default(),
                }
            })
            .collect())
    }

    fn create_snapshot(&self, config: &str, description: &str) -> Result<(), GatewayError> {
        self.run(&["-c", config, "create", "-d", description])?;
        Ok(())
    }

    fn delete_snapshot(&self, config: &str, id: &str) -> Result<(), GatewayError> {
        self.run(&["-c", config, "delete", id])?;
        Ok(())
    }

    fn revert_snapshot(&self, config: &str, id: &str) -> Result<(), GatewayError> {
        let range = format!("{}..0", id);
        self.run(&["-c", config, "undochange", &range])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRunner;
    use super::*;

    #[test]
    fn lists_configs_in_tool_order() {
        let gateway = SnapperGateway::new(MockRunner::typical_system());
        let configs = gateway.list_configs().unwrap();
        assert_eq!(configs, vec!["root".to_string(), "home".to_string()]);
    }

    #[test]
    fn lists_snapshots_without_resorting() {
        let gateway = SnapperGateway::new(MockRunner::typical_system());
        let records = gateway.list_snapshots("root").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].description, "init");
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].description, "before update");
    }

    #[test]
    fn empty_configuration_lists_no_records() {
        let gateway = SnapperGateway::new(MockRunner::typical_system());
        let records = gateway.list_snapshots("home").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn create_invokes_expected_command() {
        let mut mock = MockRunner::new();
        mock.expect(
            "snapper -c root create -d before update",
            CommandOutput::ok(""),
        );
        let gateway = SnapperGateway::new(mock);
        gateway.create_snapshot("root", "before update").unwrap();
    }

    #[test]
    fn delete_invokes_expected_command() {
        let mut mock = MockRunner::new();
        mock.expect("snapper -c root delete 2", CommandOutput::ok(""));
        let gateway = SnapperGateway::new(mock);
        gateway.delete_snapshot("root", "2").unwrap();
    }

    #[test]
    fn revert_uses_undo_range_to_baseline() {
        let mut mock = MockRunner::new();
        mock.expect("snapper -c root undochange 2..0", CommandOutput::ok(""));
        let gateway = SnapperGateway::new(mock);
        gateway.revert_snapshot("root", "2").unwrap();
    }

    #[test]
    fn non_zero_exit_is_execution_failed() {
        let mut mock = MockRunner::new();
        mock.expect(
            "snapper -c root delete 7",
            CommandOutput::failed("Snapshot '7' not found."),
        );
        let gateway = SnapperGateway::new(mock);
        let err = gateway.delete_snapshot("root", "7").unwrap_err();
        assert!(matches!(err, GatewayError::ExecutionFailed { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn spawn_failure_is_reported() {
        let gateway = SnapperGateway::new(MockRunner::new());
        let err = gateway.list_configs().unwrap_err();
        assert!(matches!(err, GatewayError::Spawn(_)));
    }

    #[test]
    fn malformed_listing_is_a_parse_error() {
        let mut mock = MockRunner::new();
        mock.expect(
            "snapper --csvout -c root list --columns config,number,date,description",
            CommandOutput::ok("config,number,date,description\nroot,1\n"),
        );
        let gateway = SnapperGateway::new(mock);
        let err = gateway.list_snapshots("root").unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[test]
    fn custom_binary_path_is_used() {
        let mut mock = MockRunner::new();
        mock.expect(
            "/usr/local/bin/snapper --csvout list-configs --columns config",
            CommandOutput::ok("config\nroot\n"),
        );
        let gateway = SnapperGateway::new(mock).with_binary("/usr/local/bin/snapper");
        assert_eq!(gateway.list_configs().unwrap(), vec!["root".to_string()]);
    }
}
