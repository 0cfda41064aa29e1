//! Remote execution port
//!
//! Abstracts "run this shell line on the target host" so operations can be
//! exercised against a recording fake in tests.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Responder;
use crate::error::WiseResult;

/// Who a command runs as
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Privilege {
    /// The connected login user
    #[default]
    Login,
    /// root, through sudo
    Root,
    /// Another account, through `sudo -u`
    As(String),
}

impl Privilege {
    pub fn is_elevated(&self) -> bool {
        !matches!(self, Privilege::Login)
    }
}

/// A shell command line plus how to run it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub line: String,
    pub privilege: Privilege,
    /// Working directory (`cd <dir> && ...`)
    pub cwd: Option<String>,
    /// Tolerate a non-zero exit instead of failing
    pub warn: bool,
    /// Capture output instead of echoing it
    pub hide: bool,
    /// Attach a pseudo-terminal
    pub pty: bool,
    /// The line carries a secret; never log or report it
    pub sensitive: bool,
    pub responders: Vec<Responder>,
}

impl ShellCommand {
    /// Command run as the login user
    pub fn run(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            privilege: Privilege::Login,
            cwd: None,
            warn: false,
            hide: false,
            pty: false,
            sensitive: false,
            responders: Vec::new(),
        }
    }

    /// Command run as root
    pub fn sudo(line: impl Into<String>) -> Self {
        Self {
            privilege: Privilege::Root,
            ..Self::run(line)
        }
    }

    /// Run as `user` through sudo
    pub fn as_user(mut self, user: impl Into<String>) -> Self {
        self.privilege = Privilege::As(user.into());
        self
    }

    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn warn(mut self) -> Self {
        self.warn = true;
        self
    }

    pub fn hide(mut self) -> Self {
        self.hide = true;
        self
    }

    pub fn pty(mut self) -> Self {
        self.pty = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// The line as it may appear in logs and error messages
    pub fn display_line(&self) -> &str {
        if self.sensitive {
            "<redacted>"
        } else {
            &self.line
        }
    }

    pub fn respond(mut self, responder: Responder) -> Self {
        self.pty = true;
        self.responders.push(responder);
        self
    }
}

/// What a finished command reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.status == Some(0)
    }

    pub fn failed(&self) -> bool {
        !self.ok()
    }
}

/// Executes commands on one remote host
pub trait RemoteExecutor {
    /// Host this executor talks to
    fn host(&self) -> &str;

    /// Login user on the host
    fn user(&self) -> &str;

    /// Run a command and report how it finished
    ///
    /// A non-zero exit is not an error here; `Err` is reserved for failures to
    /// run the command at all (spawn errors, authentication).
    fn execute(&self, command: &ShellCommand) -> WiseResult<CommandOutput>;

    /// Copy a local file to `remote` as the login user
    fn upload(&self, local: &Path, remote: &str) -> WiseResult<()>;
}

/// Parameters used to open a session with the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub identity: PathBuf,
    pub sudo_password: Option<String>,
}

/// Opens remote executors
pub trait Connector {
    fn connect(&self, params: &ConnectionParams) -> WiseResult<Box<dyn RemoteExecutor>>;
}
