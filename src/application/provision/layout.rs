use crate::application::session::Session;
use crate::domain::ports::ShellCommand;
use crate::error::WiseResult;

/// Create the project directory tree and hand it to the project owner
pub fn layout(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.reporter().section("Creating layout");

    session.sudo(format!("mkdir -p {}", config.layout_dirs().join(" ")))?;
    session.sudo(format!(
        "chown -R {} {}",
        config.owner(),
        config.project_path()
    ))?;
    Ok(())
}

pub fn fix_permissions(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.reporter().section("Fixing permissions");

    session.exec(
        ShellCommand::sudo(format!("chown -R {} {}", config.owner(), config.project_path()))
            .warn()
            .hide(),
    )?;
    session.exec(
        ShellCommand::sudo(format!("chmod -R g+w {}", config.project_path()))
            .warn()
            .hide(),
    )?;
    Ok(())
}
