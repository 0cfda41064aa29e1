//! `ssh`/`scp` backed remote executor
//!
//! Every command is a fresh `ssh` invocation multiplexed over one control
//! master, so the handshake happens once per session.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::domain::ports::{
    CommandOutput, ConnectionParams, Connector, RemoteExecutor, ShellCommand,
};
use crate::domain::value_objects::Responder;
use crate::error::{WiseError, WiseResult};
use crate::infrastructure::process;

use super::args::{remote_line, scp_args, ssh_args, SudoAuth, SUDO_PROMPT};

/// ssh reserves this exit status for its own errors
const SSH_ERROR_STATUS: i32 = 255;

pub struct SshExecutor {
    params: ConnectionParams,
    control_dir: Option<TempDir>,
}

impl SshExecutor {
    pub fn new(params: ConnectionParams) -> Self {
        let control_dir = tempfile::Builder::new()
            .prefix("wise-ssh-")
            .tempdir()
            .map_err(|e| tracing::debug!(error = %e, "no control socket directory, multiplexing disabled"))
            .ok();
        Self {
            params,
            control_dir,
        }
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.params.user, self.params.host)
    }

    fn control_path(&self) -> Option<PathBuf> {
        self.control_dir.as_ref().map(|dir| dir.path().join("cm"))
    }

    /// Pick how sudo gets its password and patch the command accordingly.
    fn prepare(&self, command: &ShellCommand) -> (ShellCommand, SudoAuth, Option<String>) {
        let mut prepared = command.clone();
        if !command.privilege.is_elevated() {
            return (prepared, SudoAuth::NonInteractive, None);
        }
        match &self.params.sudo_password {
            None => (prepared, SudoAuth::NonInteractive, None),
            Some(password) if command.pty => {
                prepared
                    .responders
                    .insert(0, Responder::line(SUDO_PROMPT, password));
                (prepared, SudoAuth::Prompt, None)
            }
            Some(password) => (prepared, SudoAuth::Stdin, Some(format!("{}\n", password))),
        }
    }

    fn check_auth(&self, output: &CommandOutput) -> WiseResult<()> {
        if output.status == Some(SSH_ERROR_STATUS) && output.stderr.contains("Permission denied") {
            return Err(WiseError::AuthenticationFailed {
                user: self.params.user.clone(),
                host: self.params.host.clone(),
            });
        }
        Ok(())
    }
}

impl RemoteExecutor for SshExecutor {
    fn host(&self) -> &str {
        &self.params.host
    }

    fn user(&self) -> &str {
        &self.params.user
    }

    fn execute(&self, command: &ShellCommand) -> WiseResult<CommandOutput> {
        let (prepared, auth, stdin_input) = self.prepare(command);
        let line = remote_line(&prepared, auth);
        tracing::debug!(
            host = %self.params.host,
            privilege = ?prepared.privilege,
            line = %prepared.display_line(),
            "ssh"
        );

        let control_path = self.control_path();
        let mut ssh = Command::new("ssh");
        ssh.args(ssh_args(
            &self.destination(),
            self.params.port,
            &self.params.identity,
            control_path.as_deref(),
            prepared.pty,
            &line,
        ));

        let output = process::run(ssh, &prepared, stdin_input.as_deref())?;
        tracing::debug!(status = ?output.status, "ssh finished");
        self.check_auth(&output)?;
        Ok(output)
    }

    fn upload(&self, local: &Path, remote: &str) -> WiseResult<()> {
        tracing::debug!(local = %local.display(), %remote, "scp");
        let control_path = self.control_path();
        let output = Command::new("scp")
            .args(scp_args(
                &self.destination(),
                self.params.port,
                &self.params.identity,
                control_path.as_deref(),
                local,
                remote,
            ))
            .stdin(Stdio::null())
            .output()?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        self.check_auth(&result)?;
        if result.failed() {
            return Err(WiseError::RemoteCommandFailed {
                command: format!("scp {} {}", local.display(), remote),
                status: result.status,
                stderr: result.stderr,
            });
        }
        Ok(())
    }
}

impl Drop for SshExecutor {
    fn drop(&mut self) {
        let Some(control_path) = self.control_path() else {
            return;
        };
        if !control_path.exists() {
            return;
        }
        let _ = Command::new("ssh")
            .arg("-O")
            .arg("exit")
            .arg("-o")
            .arg(format!("ControlPath={}", control_path.display()))
            .arg(self.destination())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}

/// Opens [`SshExecutor`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct SshConnector;

impl Connector for SshConnector {
    fn connect(&self, params: &ConnectionParams) -> WiseResult<Box<dyn RemoteExecutor>> {
        if !params.identity.exists() {
            return Err(WiseError::SshKeyMissing {
                path: params.identity.clone(),
            });
        }
        tracing::debug!(host = %params.host, user = %params.user, port = params.port, "opening ssh session");
        Ok(Box::new(SshExecutor::new(params.clone())))
    }
}
