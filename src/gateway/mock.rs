//! In-memory mock command runner for testing without a real snapper binary.
//!
//! Stores a transcript of expected command lines and their outputs, allowing
//! tests (and the `--mock` demo mode) to simulate snapper on any machine.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::sync::PoisonError;

use super::runner::{CommandOutput, CommandRunner};

/// Canned command runner.
///
/// Responses are keyed by the full command line. Multiple responses for the
/// same command line are returned in order, with the last one repeating, so a
/// test can model a listing that changes after a create or delete.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<String>>,
    /// When set, unknown command lines succeed with empty output instead of
    /// failing. Used by the demo scenario where create/delete arguments are
    /// typed by the operator and cannot be known up front.
    permissive: bool,
}

impl MockRunner {
    /// Creates an empty mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the given command line.
    pub fn expect(&mut self, command_line: impl Into<String>, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(command_line.into())
            .or_default()
            .push_back(output);
    }

    /// Returns every command line that has been run, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A small demo system: configurations `root` and `home`, with two
    /// snapshots under `root` and none under `home`.
    pub fn typical_system() -> Self {
        let mut mock = Self::new();
        mock.permissive = true;
        mock.expect(
            "snapper --csvout list-configs --columns config",
            CommandOutput::ok("config\nroot\nhome\n"),
        );
        mock.expect(
            "snapper --csvout -c root list --columns config,number,date,description",
            CommandOutput::ok(
                "config,number,date,description\n\
                 root,1,2026-02-07 17:00:00,init\n\
                 root,2,2026-02-08 09:30:00,before update\n",
            ),
        );
        mock.expect(
            "snapper --csvout -c home list --columns config,number,date,description",
            CommandOutput::ok("config,number,date,description\n"),
        );
        mock
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());

        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match responses.get_mut(&line) {
            Some(queue) => {
                let output = if queue.len() > 1 {
                    queue.pop_front().unwrap_or_default()
                } else {
                    // Last response is sticky.
                    queue.front().cloned().unwrap_or_default()
                };
                Ok(output)
            }
            None if self.permissive => Ok(CommandOutput::ok("")),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no canned response for {:?}", line),
            )),
        }
    }
}
