//! User-facing commands and the operation sequence each one runs

use std::fmt;

use crate::config;
use crate::domain::ports::ShellCommand;
use crate::domain::value_objects::{OptionSet, Responder};
use crate::error::{WiseError, WiseResult};

use super::deploy;
use super::provision;
use super::session::Session;

/// `setup_ssl` argument selecting the renewal-only flow
pub const RENEW_ARTIFACT: &str = "renew";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Deploy,
    Deps,
    Update,
    Install,
    Uninstall,
    FixPermissions,
    AddRemote,
    UploadKey,
    CreateSuperuser,
    ResetDb,
    SetupSsl(Option<String>),
    Restart,
    Run(String),
    CheckLanguage,
    Migrate,
    LoadFixtures,
}

impl Command {
    /// Commands that connect as the superuser and prompt for its sudo password
    pub fn requires_sudo(&self) -> bool {
        matches!(
            self,
            Command::Update
                | Command::Deps
                | Command::Install
                | Command::Uninstall
                | Command::Restart
                | Command::FixPermissions
                | Command::CreateSuperuser
                | Command::SetupSsl(_)
                | Command::CheckLanguage
                | Command::ResetDb
        )
    }

    /// Commands that only run on the operator's machine (no warm-up)
    pub fn only_local(&self) -> bool {
        matches!(self, Command::AddRemote | Command::UploadKey)
    }

    pub fn execute(&self, session: &Session) -> WiseResult<()> {
        match self {
            Command::Deploy => {
                deploy::push(session)?;
                deploy::environment(session)?;
                deploy::install(session)
            }
            Command::Deps => provision::install_dependencies(session),
            Command::Update => provision::update_system(session),
            Command::Install => install(session),
            Command::Uninstall => provision::teardown(session),
            Command::FixPermissions => provision::fix_permissions(session),
            Command::AddRemote => provision::add_remote(session),
            Command::UploadKey => upload_key(session),
            Command::CreateSuperuser => deploy::create_superuser(session),
            Command::ResetDb => provision::reset_db(session),
            Command::SetupSsl(artifact) => setup_ssl(session, artifact.as_deref()),
            Command::Restart => provision::restart_services(session),
            Command::Run(name) => deploy::run_command(session, name),
            Command::CheckLanguage => provision::check_language(session),
            Command::Migrate => deploy::migrate(session),
            Command::LoadFixtures => deploy::load_fixtures(session),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Deploy => f.write_str("deploy"),
            Command::Deps => f.write_str("deps"),
            Command::Update => f.write_str("update"),
            Command::Install => f.write_str("install"),
            Command::Uninstall => f.write_str("uninstall"),
            Command::FixPermissions => f.write_str("fix_permissions"),
            Command::AddRemote => f.write_str("add_remote"),
            Command::UploadKey => f.write_str("upload_key"),
            Command::CreateSuperuser => f.write_str("create_superuser"),
            Command::ResetDb => f.write_str("resetdb"),
            Command::SetupSsl(None) => f.write_str("setup_ssl"),
            Command::SetupSsl(Some(artifact)) => write!(f, "setup_ssl {}", artifact),
            Command::Restart => f.write_str("restart"),
            Command::Run(name) => write!(f, "run {}", name),
            Command::CheckLanguage => f.write_str("check_language"),
            Command::Migrate => f.write_str("migrate"),
            Command::LoadFixtures => f.write_str("load_fixtures"),
        }
    }
}

/// Full server provisioning for a fresh host
fn install(session: &Session) -> WiseResult<()> {
    provision::install_dependencies(session)?;
    provision::create_user(session)?;
    provision::create_group(session)?;
    provision::layout(session)?;
    provision::create_db(session)?;
    provision::fix_permissions(session)?;
    provision::setup_repository(session)?;
    provision::add_remote(session)?;
    provision::configure_web_server(session)?;
    provision::write_start_script(session)?;
    provision::configure_supervisor(session)?;
    provision::fix_permissions(session)?;
    provision::letsencrypt(session)
}

/// Copy the public key to the project account, answering its password prompt
fn upload_key(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session
        .reporter()
        .section(&format!("Uploading ssh key for [{}]", config.project_user()));
    session.local(
        ShellCommand::run(format!(
            "ssh-copy-id -i {} -p {} {}@{}",
            config.sshkey().display(),
            config.port(),
            config.project_user(),
            config.ipv4()
        ))
        .respond(Responder::line("password:", config.password())),
    )?;
    Ok(())
}

/// Certificate issuance, renewal or web server refresh.
///
/// When https is off the operator is asked to switch it on first. Accepting
/// updates the configuration file and the rest runs with https enabled;
/// declining leaves both untouched and the artifact still runs.
fn setup_ssl(session: &Session, artifact: Option<&str>) -> WiseResult<()> {
    let https_session;
    let session = if session.config().https() || !confirm_https(session)? {
        session
    } else {
        config::enable_https(session.config_path())?;
        https_session = session.with_config(session.config().with_https_enabled());
        &https_session
    };

    match artifact {
        None => {
            provision::ensure_certbot(session)?;
            provision::letsencrypt(session)
        }
        Some(RENEW_ARTIFACT) => provision::renew_certificates(session),
        Some(name) if name.eq_ignore_ascii_case(session.config().web_server().as_str()) => {
            provision::configure_web_server(session)
        }
        Some(other) => Err(WiseError::UnsupportedOption {
            kind: "ssl artifact",
            value: other.to_string(),
        }),
    }
}

fn confirm_https(session: &Session) -> WiseResult<bool> {
    let question = format!(
        "HTTPS is disabled in [{}]. Enable it?",
        session.config_path().display()
    );
    let accepted = session.prompter().confirm(&question, false)?;
    if !accepted {
        session.reporter().warn("HTTPS left disabled");
    }
    Ok(accepted)
}
