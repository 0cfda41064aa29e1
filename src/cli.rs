use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wise::application::Command;
use wise::domain::value_objects::CONFIG_FILE_NAME;

/// Wise - provision and deploy Django projects over SSH
#[derive(Parser, Debug)]
#[command(name = "wise")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Commands read the project from ./django.json unless --file is given.")]
pub struct Cli {
    /// Project configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub file: PathBuf,

    /// Verbosity level (-v, -vv, -vvv); WISE_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
#[command(rename_all = "snake_case")]
pub enum Commands {
    /// Push code, upload .env and install the project
    Deploy,

    /// Install OS packages for the server
    Deps,

    /// Update and upgrade OS packages
    Update,

    /// Provision the server from scratch
    Install,

    /// Remove the project, its user and its files from the server
    Uninstall,

    /// Reset ownership and group write on the project tree
    #[command(alias = "fix-permissions")]
    FixPermissions,

    /// Register the `production` git remote locally
    #[command(alias = "add-remote")]
    AddRemote,

    /// Copy the ssh public key to the project user
    #[command(alias = "upload-key")]
    UploadKey,

    /// Run `manage.py createsuperuser`
    #[command(alias = "create-superuser")]
    CreateSuperuser,

    /// Drop and recreate the database
    #[command(name = "resetdb", alias = "reset-db")]
    ResetDb,

    /// Issue certificates, renew them, or refresh the web server config
    #[command(alias = "setup-ssl")]
    SetupSsl {
        /// `renew`, or the configured web server name
        artifact: Option<String>,
    },

    /// Restart supervisor, the web server and the application
    Restart,

    /// Run a manage.py command
    Run {
        /// Management command, e.g. `shell`
        command: String,
    },

    /// Make sure the server locale is UTF-8
    #[command(alias = "check-language")]
    CheckLanguage,

    /// Run `manage.py migrate`
    Migrate,

    /// Run `manage.py loaddata`
    #[command(alias = "load-fixtures")]
    LoadFixtures,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Deploy => Command::Deploy,
            Commands::Deps => Command::Deps,
            Commands::Update => Command::Update,
            Commands::Install => Command::Install,
            Commands::Uninstall => Command::Uninstall,
            Commands::FixPermissions => Command::FixPermissions,
            Commands::AddRemote => Command::AddRemote,
            Commands::UploadKey => Command::UploadKey,
            Commands::CreateSuperuser => Command::CreateSuperuser,
            Commands::ResetDb => Command::ResetDb,
            Commands::SetupSsl { artifact } => Command::SetupSsl(artifact),
            Commands::Restart => Command::Restart,
            Commands::Run { command } => Command::Run(command),
            Commands::CheckLanguage => Command::CheckLanguage,
            Commands::Migrate => Command::Migrate,
            Commands::LoadFixtures => Command::LoadFixtures,
        }
    }
}
