//! One command's view of the world: the loaded configuration, the open
//! remote executor and the local collaborators.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::entities::ProjectConfig;
use crate::domain::ports::{
    CommandOutput, LocalRunner, Prompter, RemoteExecutor, Reporter, ShellCommand,
    TemplateContext, TemplateRenderer,
};
use crate::error::{WiseError, WiseResult};

/// Local collaborators shared by every operation
#[derive(Clone, Copy)]
pub struct Toolkit<'a> {
    pub local: &'a dyn LocalRunner,
    pub templates: &'a dyn TemplateRenderer,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

#[derive(Clone)]
pub struct Session<'a> {
    config: ProjectConfig,
    config_path: PathBuf,
    remote: &'a dyn RemoteExecutor,
    tools: Toolkit<'a>,
}

impl<'a> Session<'a> {
    pub fn new(
        config: ProjectConfig,
        config_path: impl Into<PathBuf>,
        remote: &'a dyn RemoteExecutor,
        tools: Toolkit<'a>,
    ) -> Self {
        Self {
            config,
            config_path: config_path.into(),
            remote,
            tools,
        }
    }

    /// Same session, different configuration
    pub fn with_config(&self, config: ProjectConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory holding the configuration file (`.env` lives beside it)
    pub fn workdir(&self) -> PathBuf {
        match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.tools.reporter
    }

    pub fn prompter(&self) -> &'a dyn Prompter {
        self.tools.prompter
    }

    pub fn local_runner(&self) -> &'a dyn LocalRunner {
        self.tools.local
    }

    /// Run as the login user; a non-zero exit is an error
    pub fn run(&self, line: impl Into<String>) -> WiseResult<CommandOutput> {
        self.exec(ShellCommand::run(line))
    }

    /// Run as root; a non-zero exit is an error
    pub fn sudo(&self, line: impl Into<String>) -> WiseResult<CommandOutput> {
        self.exec(ShellCommand::sudo(line))
    }

    /// Run on the remote host, failing on a non-zero exit unless `warn` is set
    pub fn exec(&self, command: ShellCommand) -> WiseResult<CommandOutput> {
        let output = self.remote.execute(&command)?;
        if output.failed() {
            if !command.warn {
                return Err(WiseError::RemoteCommandFailed {
                    command: command.display_line().to_string(),
                    status: output.status,
                    stderr: output.stderr,
                });
            }
            tracing::warn!(
                status = ?output.status,
                command = %command.display_line(),
                "remote command failed (tolerated)"
            );
        }
        Ok(output)
    }

    /// Run on the operator's machine with the same failure policy as [`Session::exec`]
    pub fn local(&self, command: ShellCommand) -> WiseResult<CommandOutput> {
        let output = self.tools.local.execute(&command)?;
        if output.failed() {
            if !command.warn {
                return Err(WiseError::LocalCommandFailed {
                    command: command.display_line().to_string(),
                    status: output.status,
                    stderr: output.stderr,
                });
            }
            tracing::warn!(
                status = ?output.status,
                command = %command.display_line(),
                "local command failed (tolerated)"
            );
        }
        Ok(output)
    }

    pub fn render(&self, template: &str, context: &TemplateContext) -> WiseResult<String> {
        self.tools.templates.render(template, context)
    }

    /// Copy a local file to `remote` as the login user
    pub fn upload(&self, local: &Path, remote: &str) -> WiseResult<()> {
        tracing::debug!(local = %local.display(), %remote, "upload");
        self.remote.upload(local, remote)
    }

    /// Render `template` and upload it to `/tmp/<staged_name>`.
    ///
    /// Returns the staged remote path; callers move it into place with the
    /// privileges the destination needs.
    pub fn stage(
        &self,
        template: &str,
        context: &TemplateContext,
        staged_name: &str,
    ) -> WiseResult<String> {
        let rendered = self.render(template, context)?;
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(rendered.as_bytes())?;
        file.flush()?;

        let staged = format!("/tmp/{}", staged_name);
        self.upload(file.path(), &staged)?;
        Ok(staged)
    }
}
