use crate::application::session::Session;
use crate::domain::ports::{ShellCommand, TemplateContext};
use crate::domain::value_objects::GIT_REMOTE;
use crate::error::WiseResult;

/// Bare shared repository with a post-receive hook that checks out into the
/// code directory.
pub fn setup_repository(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let user = config.project_user();
    let repo = config.git_repo_path();
    session.reporter().section("Setting up git repository");

    session.exec(ShellCommand::sudo(format!("mkdir -p {}", repo)).as_user(user))?;
    session.exec(
        ShellCommand::sudo(format!("git init --bare --shared {}", repo))
            .as_user(user)
            .warn(),
    )?;

    let context = TemplateContext::new().with("work_dir", config.code_path());
    let staged = session.stage("post-receive", &context, "post-receive")?;
    let hook = format!("{}/hooks/post-receive", repo);
    session.sudo(format!("mv {} {}", staged, hook))?;
    session.sudo(format!("chmod +x {}", hook))?;
    session.sudo(format!("chown -R {} {}", config.owner(), repo))?;
    Ok(())
}

/// Point the local `production` remote at the server's bare repository
pub fn add_remote(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.reporter().section("Adding git remote");

    let url = format!(
        "{}@{}:{}",
        config.project_user(),
        config.git_host(),
        config.git_repo_path()
    );
    session.local(
        ShellCommand::run(format!("git remote remove {}", GIT_REMOTE))
            .warn()
            .hide(),
    )?;
    session.local(
        ShellCommand::run(format!("git remote add {} {}", GIT_REMOTE, url))
            .warn()
            .hide(),
    )?;
    session.reporter().detail(&format!("{} -> {}", GIT_REMOTE, url));
    Ok(())
}
