use crate::application::session::Session;
use crate::domain::ports::{ShellCommand, TemplateContext};
use crate::domain::value_objects::{OptionSet, WebServer};
use crate::error::{WiseError, WiseResult};

const SITES_AVAILABLE: &str = "/etc/nginx/sites-available";
const SITES_ENABLED: &str = "/etc/nginx/sites-enabled";

pub fn configure_web_server(session: &Session) -> WiseResult<()> {
    match session.config().web_server() {
        WebServer::Nginx => nginx(session),
        other => Err(WiseError::UnsupportedOption {
            kind: WebServer::KIND,
            value: other.as_str().to_string(),
        }),
    }
}

/// Replace the default site with the project's, TLS flavoured when https is on
fn nginx(session: &Session) -> WiseResult<()> {
    let config = session.config();
    let name = config.project_name();
    session.reporter().section("Configuring nginx");

    let available = format!("{}/{}.conf", SITES_AVAILABLE, name);
    let enabled = format!("{}/{}.conf", SITES_ENABLED, name);
    for stale in [format!("{}/default", SITES_ENABLED), enabled, available.clone()] {
        session.exec(ShellCommand::sudo(format!("rm {}", stale)).warn())?;
    }

    let template = if config.https() {
        "django_nginx_ssl.conf"
    } else {
        "django_nginx.conf"
    };
    let context = TemplateContext::new()
        .with("project_name", name)
        .with("project_path", config.project_path())
        .with("project_htdocs", config.htdocs_path())
        .with("project_domain", config.domain());
    let staged = session.stage(template, &context, &format!("{}.conf", name))?;

    session.exec(ShellCommand::sudo(format!("mv {} {}", staged, available)).warn())?;
    session.exec(ShellCommand::sudo(format!("ln -s {} {}/", available, SITES_ENABLED)).warn())?;
    Ok(())
}
