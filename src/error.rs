//! Error types for Wise
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Wise operations
pub type WiseResult<T> = Result<T, WiseError>;

/// Main error type for Wise operations
#[derive(Error, Debug)]
pub enum WiseError {
    /// The project configuration file does not exist
    #[error("valid [{}] file is required", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file exists but cannot be used
    #[error("invalid configuration in {}: {message}", path.display())]
    ConfigInvalid { path: PathBuf, message: String },

    /// The remote host rejected our credentials
    #[error("authentication failed for {user}@{host}")]
    AuthenticationFailed { user: String, host: String },

    /// A remote command exited non-zero and the caller did not tolerate it
    #[error("remote command failed ({}): {command}{}", status_label(*status), stderr_suffix(stderr))]
    RemoteCommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A local command exited non-zero and the caller did not tolerate it
    #[error("local command failed ({}): {command}{}", status_label(*status), stderr_suffix(stderr))]
    LocalCommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The configured SSH key file is missing locally
    #[error("[sshkey] file doesn't exist: {}", path.display())]
    SshKeyMissing { path: PathBuf },

    /// No OS package list is bundled for the detected distribution
    #[error("no package list available for distribution '{codename}'")]
    MissingPackageList { codename: String },

    /// A configured option has no implementation for this operation
    #[error("unsupported {kind}: '{value}'")]
    UnsupportedOption { kind: &'static str, value: String },

    /// A known gap in the tool
    #[error("{feature} is not implemented")]
    NotImplemented { feature: String },

    /// Template lookup failed
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template references a variable that was not provided
    #[error("template '{template}' references unknown variable '{variable}'")]
    TemplateVariable { template: String, variable: String },

    /// Interactive prompt failed (no tty, interrupted, ...)
    #[error("prompt failed: {message}")]
    Prompt { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WiseError {
    /// Whether this error is the authentication failure the dispatcher reports itself
    pub fn is_authentication(&self) -> bool {
        matches!(self, WiseError::AuthenticationFailed { .. })
    }
}

fn status_label(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}
