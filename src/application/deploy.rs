//! Deployment operations: code push, environment file and Django management
//! commands inside the project virtualenv.

use crate::domain::ports::ShellCommand;
use crate::domain::value_objects::GIT_REMOTE;
use crate::error::WiseResult;

use super::session::Session;

const ENV_FILE: &str = ".env";

pub fn push(session: &Session) -> WiseResult<()> {
    session.reporter().section("Pushing code");
    session.local(ShellCommand::run(format!("git push {} master", GIT_REMOTE)))?;
    Ok(())
}

/// Upload the local `.env` beside the checked-out code; warn when absent
pub fn environment(session: &Session) -> WiseResult<()> {
    let local = session.workdir().join(ENV_FILE);
    if !session.local_runner().file_exists(&local) {
        session.reporter().warn("[.env] file is required");
        return Ok(());
    }
    session.reporter().section("Uploading environment");
    let remote = format!("{}{}", session.config().code_path(), ENV_FILE);
    session.upload(&local, &remote)
}

/// Virtualenv, requirements, migrations and static files
pub fn install(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let venv = config.venv_path();
    let code = config.code_path();
    let python = python(session);
    session.reporter().section("Installing project");

    // always recreated; virtualenv rebuilds over an existing tree
    session.exec(
        ShellCommand::run(format!("virtualenv -p python3 {} --always-copy", venv))
            .warn()
            .hide(),
    )?;
    session.exec(
        ShellCommand::run(format!(
            "{}bin/pip install -r requirements/production.txt",
            venv
        ))
        .in_dir(code.clone()),
    )?;
    session.exec(ShellCommand::run(format!("{} manage.py migrate", python)).in_dir(code.clone()))?;
    session.exec(
        ShellCommand::run(format!(
            "{} manage.py collectstatic -v 0 --noinput --traceback -i django_extensions \
             -i '*.coffee' -i '*.rb' -i '*.scss' -i '*.less' -i '*.sass'",
            python
        ))
        .in_dir(code),
    )?;
    Ok(())
}

/// `manage.py <name>` on a pseudo-terminal so interactive prompts work
pub fn run_command(session: &Session, name: &str) -> WiseResult<()> {
    let code = session.config().code_path();
    session
        .reporter()
        .section(&format!("Running [manage.py {}]", name));
    session.exec(
        ShellCommand::run(format!("{} {}manage.py {}", python(session), code, name))
            .in_dir(code)
            .pty(),
    )?;
    Ok(())
}

pub fn migrate(session: &Session) -> WiseResult<()> {
    run_command(session, "migrate")
}

pub fn load_fixtures(session: &Session) -> WiseResult<()> {
    run_command(session, "loaddata")
}

pub fn create_superuser(session: &Session) -> WiseResult<()> {
    run_command(session, "createsuperuser")
}

/// Interpreter invocation with the production Django environment
fn python(session: &Session) -> String {
    format!(
        "DJANGO_READ_ENV_FILE=True DJANGO_ENV=production DJANGO_SETTINGS_MODULE=config.settings {}bin/python",
        session.config().venv_path()
    )
}
