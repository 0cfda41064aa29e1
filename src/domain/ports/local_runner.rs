//! Local execution port
//!
//! Commands that run on the operator's machine (git, ssh-copy-id).

use std::path::Path;

use crate::domain::ports::{CommandOutput, ShellCommand};
use crate::error::WiseResult;

/// Runs commands on the local machine.
///
/// Local commands always run as the invoking user; `privilege` is ignored.
pub trait LocalRunner {
    /// Run a command and report how it finished (non-zero exit is not an `Err`)
    fn execute(&self, command: &ShellCommand) -> WiseResult<CommandOutput>;

    /// Whether a local file exists
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
