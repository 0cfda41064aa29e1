//! Configuration loading
//!
//! Reads the project JSON file, applies defaults and derives the
//! user/group/path fields. Loading is all-or-nothing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::{ProjectConfig, ProjectSettings};
use crate::domain::value_objects::{
    Database, Deployment, WebServer, DEFAULT_EMAIL, DEFAULT_PORT, DEFAULT_SSH_KEY,
};
use crate::error::{WiseError, WiseResult};

use super::home::expand_home;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    project: Option<String>,
    #[serde(default)]
    password: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    ipv4: String,
    #[serde(default)]
    https: bool,
    #[serde(default)]
    superuser: Option<String>,
    #[serde(default = "default_sshkey")]
    sshkey: String,
    #[serde(default = "default_email")]
    email: String,
    #[serde(default)]
    deployment: Deployment,
    #[serde(default)]
    db_engine: Database,
    #[serde(default)]
    web_server: WebServer,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_sshkey() -> String {
    DEFAULT_SSH_KEY.to_string()
}

fn default_email() -> String {
    DEFAULT_EMAIL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Load the configuration at `path`, dropping warnings.
pub fn load(path: &Path) -> WiseResult<ProjectConfig> {
    load_with_warnings(path).map(|(config, _)| config)
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> WiseResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WiseError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(WiseError::Io(e)),
    };
    parse(&content, path)
}

/// Parse configuration text; `path` is only used in messages.
pub fn parse(content: &str, path: &Path) -> WiseResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let invalid = |message: String| WiseError::ConfigInvalid {
        path: path.to_path_buf(),
        message,
    };

    let mut unknown_keys: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let raw: RawConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_keys.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;
    deserializer.end().map_err(|e| invalid(e.to_string()))?;

    let project_name = raw
        .project
        .ok_or_else(|| invalid("missing required key 'project'".to_string()))?;
    validate_project_name(&project_name).map_err(invalid)?;

    let settings = ProjectSettings {
        project_name,
        password: raw.password,
        domain: raw.domain,
        ipv4: raw.ipv4,
        https: raw.https,
        superuser: raw.superuser.filter(|s| !s.is_empty()),
        sshkey: expand_home(&raw.sshkey),
        email: raw.email,
        deployment: raw.deployment,
        db_engine: raw.db_engine,
        web_server: raw.web_server,
        port: raw.port,
    };

    let warnings = unknown_keys
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((ProjectConfig::derive(settings), warnings))
}

/// The project name becomes an OS user, a database and part of many shell
/// lines, so it is restricted to a portable user-name alphabet.
fn validate_project_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("'project' must not be empty".to_string());
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        return Err(format!(
            "'project' must start with a lowercase letter or '_': '{}'",
            name
        ));
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
        return Err(format!(
            "'project' may only contain lowercase letters, digits, '_' and '-': '{}'",
            name
        ));
    }
    if name.len() > 32 {
        return Err(format!("'project' is longer than 32 characters: '{}'", name));
    }
    Ok(())
}
