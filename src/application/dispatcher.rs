//! Command dispatcher
//!
//! Loads configuration, opens the remote session with the right identity
//! and hands it to the requested command:
//!
//! 1. the configuration file must exist (no connection otherwise)
//! 2. load it, reporting unknown keys
//! 3. privileged commands connect as the superuser after a password prompt,
//!    everything else connects as the project user
//! 4. the ssh key must exist locally
//! 5. connect
//! 6. warm up with `uname` unless the command is local only
//! 7. run the command
//! 8. an authentication failure is reported with a remediation and ends the
//!    command without an error

use std::cell::Cell;
use std::path::Path;

use crate::config;
use crate::domain::entities::ProjectConfig;
use crate::domain::ports::{ConnectionParams, Connector, ShellCommand};
use crate::error::{WiseError, WiseResult};

use super::pipeline::Command;
use super::session::{Session, Toolkit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Connecting,
    Executing,
}

/// How a dispatched command ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    /// The remote side rejected the ssh identity; remediation was reported
    AuthenticationFailed { user: String, host: String },
}

pub struct Dispatcher<'a> {
    connector: &'a dyn Connector,
    tools: Toolkit<'a>,
    phase: Cell<Phase>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(connector: &'a dyn Connector, tools: Toolkit<'a>) -> Self {
        Self {
            connector,
            tools,
            phase: Cell::new(Phase::Idle),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn dispatch(&self, config_path: &Path, command: &Command) -> WiseResult<DispatchOutcome> {
        let result = self.dispatch_inner(config_path, command);
        self.enter(Phase::Idle);
        match result {
            Err(WiseError::AuthenticationFailed { user, host }) => {
                self.tools
                    .reporter
                    .error("Your ssh connection isn't configured correctly");
                self.tools
                    .reporter
                    .detail(&format!("Set your private ssh_keyfile for [{}]", user));
                Ok(DispatchOutcome::AuthenticationFailed { user, host })
            }
            other => other,
        }
    }

    fn dispatch_inner(&self, config_path: &Path, command: &Command) -> WiseResult<DispatchOutcome> {
        if !self.tools.local.file_exists(config_path) {
            return Err(WiseError::ConfigNotFound {
                path: config_path.to_path_buf(),
            });
        }

        let (config, warnings) = config::load_with_warnings(config_path)?;
        for warning in &warnings {
            self.tools.reporter.warn(&format!(
                "unknown key '{}' in {}",
                warning.key,
                warning.file.display()
            ));
        }

        let params = self.connection_params(&config, config_path, command)?;

        if !self.tools.local.file_exists(config.sshkey()) {
            return Err(WiseError::SshKeyMissing {
                path: config.sshkey().to_path_buf(),
            });
        }

        self.enter(Phase::Connecting);
        let remote = self.connector.connect(&params)?;

        if !command.only_local() {
            match remote.execute(&ShellCommand::run("uname").warn().hide()) {
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => tracing::debug!(error = %e, "warm-up failed, continuing"),
                Ok(_) => {}
            }
        }

        self.enter(Phase::Executing);
        tracing::info!(%command, host = %params.host, user = %params.user, "running");
        let session = Session::new(config, config_path, remote.as_ref(), self.tools);
        command.execute(&session)?;
        Ok(DispatchOutcome::Completed)
    }

    fn connection_params(
        &self,
        config: &ProjectConfig,
        config_path: &Path,
        command: &Command,
    ) -> WiseResult<ConnectionParams> {
        let (user, sudo_password) = if command.requires_sudo() {
            let superuser = config.superuser().ok_or_else(|| WiseError::ConfigInvalid {
                path: config_path.to_path_buf(),
                message: format!("[superuser] is required for '{}'", command),
            })?;
            let password = self.tools.prompter.password(&format!(
                "Put your [SUDO] password for User [{}]",
                superuser
            ))?;
            (superuser.to_string(), Some(password))
        } else {
            (config.project_user().to_string(), None)
        };

        Ok(ConnectionParams {
            host: config.ipv4().to_string(),
            port: config.port(),
            user,
            identity: config.identity_file(),
            sudo_password,
        })
    }

    fn enter(&self, phase: Phase) {
        let previous = self.phase.replace(phase);
        if previous != phase {
            tracing::info!(from = ?previous, to = ?phase, "dispatcher phase");
        }
    }
}
