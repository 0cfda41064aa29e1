use crate::application::session::Session;
use crate::domain::ports::ShellCommand;
use crate::error::WiseResult;

use super::database::drop_db;

/// Remove everything `install` created for the project.
///
/// Every step is attempted even when an earlier one failed.
pub fn teardown(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let name = config.project_name();
    let path = config.project_path();
    session.reporter().section(&format!("Removing [{}]", name));

    quiet(session, format!("pkill -u {}", config.project_user()))?;

    if let Err(e) = drop_db(session) {
        if e.is_authentication() {
            return Err(e);
        }
        session.reporter().warn(&e.to_string());
    }

    for line in [
        format!("rm -f /etc/supervisor/conf.d/{}.conf", name),
        format!("rm -f /etc/nginx/sites-enabled/{}.conf", name),
        format!("rm -f /etc/nginx/sites-available/{}.conf", name),
        format!("rm -rf {}/bin/{}.socket", path, name),
        format!("groupdel {}", config.project_group()),
        format!("userdel -r {}", config.project_user()),
        format!("rm -rf {}", path),
    ] {
        quiet(session, line)?;
    }
    Ok(())
}

fn quiet(session: &Session, line: String) -> WiseResult<()> {
    session.exec(ShellCommand::sudo(line).warn().hide())?;
    Ok(())
}
