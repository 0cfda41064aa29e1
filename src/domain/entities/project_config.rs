//! Project configuration entity
//!
//! Built once per invocation by the config loader and read-only afterwards.
//! User, group and path names are always derived from the project name.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{Database, Deployment, WebServer, HOME_BASE_PATH, SHARED_GROUP};

/// Everything an operation needs to know about the deployed project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_name: String,
    password: String,
    domain: String,
    ipv4: String,
    https: bool,
    superuser: Option<String>,
    sshkey: PathBuf,
    email: String,
    deployment: Deployment,
    db_engine: Database,
    web_server: WebServer,
    port: u16,
    project_user: String,
    project_group: String,
    project_path: String,
}

/// User-supplied fields, before derivation
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub project_name: String,
    pub password: String,
    pub domain: String,
    pub ipv4: String,
    pub https: bool,
    pub superuser: Option<String>,
    pub sshkey: PathBuf,
    pub email: String,
    pub deployment: Deployment,
    pub db_engine: Database,
    pub web_server: WebServer,
    pub port: u16,
}

impl ProjectConfig {
    /// Derive the full configuration from user settings
    pub fn derive(settings: ProjectSettings) -> Self {
        let project_user = settings.project_name.clone();
        let project_path = format!("{}/{}", HOME_BASE_PATH, project_user);
        Self {
            project_name: settings.project_name,
            password: settings.password,
            domain: settings.domain,
            ipv4: settings.ipv4,
            https: settings.https,
            superuser: settings.superuser,
            sshkey: settings.sshkey,
            email: settings.email,
            deployment: settings.deployment,
            db_engine: settings.db_engine,
            web_server: settings.web_server,
            port: settings.port,
            project_user,
            project_group: SHARED_GROUP.to_string(),
            project_path,
        }
    }

    /// Copy of this configuration with HTTPS switched on
    pub fn with_https_enabled(&self) -> Self {
        Self {
            https: true,
            ..self.clone()
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn ipv4(&self) -> &str {
        &self.ipv4
    }

    pub fn https(&self) -> bool {
        self.https
    }

    pub fn superuser(&self) -> Option<&str> {
        self.superuser.as_deref()
    }

    /// Configured key path (already `~`-expanded)
    pub fn sshkey(&self) -> &Path {
        &self.sshkey
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn db_engine(&self) -> Database {
        self.db_engine
    }

    pub fn web_server(&self) -> WebServer {
        self.web_server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn project_user(&self) -> &str {
        &self.project_user
    }

    pub fn project_group(&self) -> &str {
        &self.project_group
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    /// Identity file handed to ssh/scp: the private half when a `.pub` is configured
    pub fn identity_file(&self) -> PathBuf {
        match self.sshkey.to_str() {
            Some(s) if s.ends_with(".pub") => PathBuf::from(&s[..s.len() - ".pub".len()]),
            _ => self.sshkey.clone(),
        }
    }

    /// Checked-out application code (trailing slash kept for templates)
    pub fn code_path(&self) -> String {
        format!("{}/code/", self.project_path)
    }

    pub fn htdocs_path(&self) -> String {
        format!("{}/htdocs/", self.project_path)
    }

    pub fn venv_path(&self) -> String {
        format!("{}/env/", self.project_path)
    }

    /// Bare repository receiving `git push production`
    pub fn git_repo_path(&self) -> String {
        format!("{}/repo/{}.git", self.project_path, self.project_name)
    }

    /// Host used in the git remote URL; the domain, or the IP when no domain is set
    pub fn git_host(&self) -> &str {
        if self.domain.is_empty() {
            &self.ipv4
        } else {
            &self.domain
        }
    }

    /// Directory tree created by `layout`, in creation order
    pub fn layout_dirs(&self) -> Vec<String> {
        let p = &self.project_path;
        let mut dirs = vec![
            p.clone(),
            format!("{}/code/", p),
            format!("{}/repo/", p),
            format!("{}/etc/", p),
            format!("{}/etc/nginx/", p),
            format!("{}/etc/ssl/", p),
            format!("{}/log/", p),
            format!("{}/bin/", p),
            format!("{}/htdocs/", p),
            format!("{}/htdocs/media/", p),
            format!("{}/htdocs/static/", p),
        ];
        if self.deployment == Deployment::Docker {
            dirs.push(format!("{}/volumes/", p));
        }
        dirs
    }

    /// `user:group` argument for chown
    pub fn owner(&self) -> String {
        format!("{}:{}", self.project_user, self.project_group)
    }
}

#[cfg(test)]
pub(crate) fn sample_settings(name: &str) -> ProjectSettings {
    ProjectSettings {
        project_name: name.to_string(),
        password: "x".to_string(),
        domain: format!("{}.test", name),
        ipv4: "10.0.0.5".to_string(),
        https: false,
        superuser: Some("admin".to_string()),
        sshkey: PathBuf::from("/home/dev/.ssh/id_rsa.pub"),
        email: crate::domain::value_objects::DEFAULT_EMAIL.to_string(),
        deployment: Deployment::Virtualenv,
        db_engine: Database::Postgres,
        web_server: WebServer::Nginx,
        port: 22,
    }
}
