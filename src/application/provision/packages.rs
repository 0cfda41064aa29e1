use crate::application::session::Session;
use crate::domain::ports::{ShellCommand, TemplateContext};
use crate::domain::value_objects::ServerOs;
use crate::error::{WiseError, WiseResult};
use crate::infrastructure::parse_package_list;

/// Install OS packages for the detected distribution plus the configured
/// database, web server and TLS tooling.
pub fn install_dependencies(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.reporter().section("Installing dependencies");

    let codename = session
        .exec(ShellCommand::run("lsb_release -sc").hide())?
        .stdout
        .trim()
        .to_string();
    let packages = package_list(session, &codename)?;
    session.reporter().detail(&format!(
        "{} packages for [{}]",
        packages.len(),
        codename
    ));

    if !packages.is_empty() {
        session.sudo(format!("apt install -y {}", packages.join(" ")))?;
    }
    session.sudo("apt autoremove -y")?;

    let db_packages = config.db_engine().packages();
    if !db_packages.is_empty() {
        session.sudo(format!("apt install -y {}", db_packages.join(" ")))?;
    }
    session.sudo(format!("apt install -y {}", config.web_server().package()))?;

    if config.https() {
        install_certbot(session)?;
    }

    if let Some(superuser) = config.superuser() {
        session.exec(
            ShellCommand::sudo(format!("adduser {} {}", superuser, config.project_group()))
                .warn()
                .hide(),
        )?;
    }
    Ok(())
}

pub fn install_certbot(session: &Session) -> WiseResult<()> {
    session.reporter().detail("Installing certbot");
    session.sudo("apt update")?;
    session.sudo("apt install -y certbot")?;
    Ok(())
}

fn package_list(session: &Session, codename: &str) -> WiseResult<Vec<String>> {
    let missing = || WiseError::MissingPackageList {
        codename: codename.to_string(),
    };
    let os = ServerOs::from_codename(codename).ok_or_else(missing)?;
    tracing::info!(os = %os, "detected server os");

    let name = format!("system-{}.txt", os.codename());
    match session.render(&name, &TemplateContext::new()) {
        Ok(content) => Ok(parse_package_list(&content)),
        Err(WiseError::TemplateNotFound { .. }) => Err(missing()),
        Err(e) => Err(e),
    }
}
