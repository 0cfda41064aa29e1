//! gunicorn launcher, supervisor program and service restarts

use crate::application::session::Session;
use crate::domain::ports::TemplateContext;
use crate::error::WiseResult;

/// Render `bin/start.sh`, the gunicorn launcher supervisor runs
pub fn write_start_script(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.reporter().section("Writing start script");

    let bin = format!("{}/bin", config.project_path());
    session.sudo(format!("mkdir -p {}", bin))?;

    let context = TemplateContext::new()
        .with("project_name", config.project_name())
        .with("project_path", config.project_path())
        .with("project_code_path", config.code_path())
        .with("project_user", config.project_user())
        .with("project_group", config.project_group());
    let staged = session.stage("start.sh", &context, "start.sh")?;

    let script = format!("{}/start.sh", bin);
    session.sudo(format!("mv {} {}", staged, script))?;
    session.sudo(format!("chmod +x {}", script))?;
    Ok(())
}

pub fn configure_supervisor(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let name = config.project_name();
    session.reporter().section("Configuring supervisor");

    let context = TemplateContext::new()
        .with("project_name", name)
        .with("project_path", config.project_path())
        .with("project_user", config.project_user())
        .with("project_group", config.project_group());
    let staged = session.stage("django_supervisor.conf", &context, &format!("{}.conf", name))?;
    session.sudo(format!("mv {} /etc/supervisor/conf.d/{}.conf", staged, name))?;
    Ok(())
}

/// `supervisorctl <action> <project>`
pub fn supervisorctl(session: &Session, action: &str) -> WiseResult<()> {
    session.sudo(format!(
        "supervisorctl {} {}",
        action,
        session.config().project_name()
    ))?;
    Ok(())
}

/// Reload supervisor programs and bounce the web server and the app
pub fn restart_services(session: &Session) -> WiseResult<()> {
    let web = session.config().web_server().service_name();
    session.reporter().section("Restarting services");

    session.sudo("supervisorctl reread")?;
    session.sudo("supervisorctl update")?;
    session.sudo(format!("service {} restart", web))?;
    session.sudo("service supervisor restart")?;
    supervisorctl(session, "restart")
}
