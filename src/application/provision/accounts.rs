use crate::application::session::Session;
use crate::domain::ports::ShellCommand;
use crate::domain::value_objects::{Responder, HOME_BASE_PATH};
use crate::error::WiseResult;

/// Create the project's OS account with a disabled password, then set the
/// configured password through `passwd`.
pub fn create_user(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let user = config.project_user();
    session.reporter().section(&format!("Creating user [{}]", user));

    let exists = session.exec(ShellCommand::run(format!("id -u {}", user)).warn().hide())?;
    if exists.ok() {
        session.reporter().detail("User already exists");
    } else {
        session.sudo(format!("adduser {} --disabled-password --gecos \"\"", user))?;
        session.exec(
            ShellCommand::sudo(format!("passwd {}", user))
                .respond(Responder::line("New password:", config.password()))
                .respond(Responder::line("Retype new password:", config.password())),
        )?;
    }
    session.sudo(format!("mkdir -p {}", HOME_BASE_PATH))?;
    Ok(())
}

/// Shared system group plus a system user bound to it. Both tolerate
/// "already exists".
pub fn create_group(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session
        .reporter()
        .section(&format!("Creating group [{}]", config.project_group()));

    session.exec(ShellCommand::sudo(format!("groupadd --system {}", config.project_group())).warn())?;
    session.exec(
        ShellCommand::sudo(format!(
            "useradd --system --gid {} --shell /bin/bash --home {} {}",
            config.project_group(),
            config.project_path(),
            config.project_user()
        ))
        .warn(),
    )?;
    Ok(())
}
