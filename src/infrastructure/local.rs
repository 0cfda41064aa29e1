//! Commands run on the operator's machine (git remotes, ssh-copy-id)

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::ports::{CommandOutput, LocalRunner, ShellCommand};
use crate::error::WiseResult;
use crate::infrastructure::process;

/// Runs lines through `sh -c` inside the project directory
#[derive(Debug, Clone)]
pub struct LocalShell {
    workdir: PathBuf,
}

impl LocalShell {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl LocalRunner for LocalShell {
    fn execute(&self, command: &ShellCommand) -> WiseResult<CommandOutput> {
        let dir = match &command.cwd {
            Some(cwd) => self.workdir.join(cwd),
            None => self.workdir.clone(),
        };
        tracing::debug!(dir = %dir.display(), line = %command.display_line(), "local");

        let output = if command.responders.is_empty() {
            let mut sh = Command::new("sh");
            sh.arg("-c").arg(&command.line).current_dir(&dir);
            process::run(sh, command, None)?
        } else {
            process::run_shell_on_pty(&command.line, &dir, command)?
        };
        tracing::debug!(status = ?output.status, "local finished");
        Ok(output)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.workdir.join(path).is_file()
    }
}
