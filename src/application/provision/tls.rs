//! Let's Encrypt certificates through certbot's standalone challenge

use crate::application::session::Session;
use crate::domain::ports::{ShellCommand, TemplateContext};
use crate::domain::value_objects::LETSENCRYPT_FOLDER;
use crate::error::WiseResult;

use super::packages::install_certbot;

/// Install certbot unless `certbot --help` already works
pub fn ensure_certbot(session: &Session) -> WiseResult<()> {
    let probe = session.exec(ShellCommand::run("certbot --help").warn().hide())?;
    if probe.failed() {
        install_certbot(session)?;
    }
    Ok(())
}

/// Issue the certificate and register weekly renewal.
///
/// Does nothing remotely while https is disabled.
pub fn letsencrypt(session: &Session) -> WiseResult<()> {
    let config = session.config();
    if !config.https() {
        session
            .reporter()
            .detail("HTTPS is disabled, skipping certificate");
        return Ok(());
    }
    session.reporter().section("Requesting certificate");

    let web = config.web_server().service_name();
    let domain = config.domain();
    session.sudo(format!(
        "certbot certonly --standalone --agree-tos --email {} --domains \"{}\" {}",
        config.email(),
        domain,
        service_hooks(web)
    ))?;
    session.sudo(format!("chmod -R go-rwx /etc/letsencrypt/live/{}", domain))?;
    session.sudo(format!("mkdir -p {}", LETSENCRYPT_FOLDER))?;

    let renew = format!("{}/renew.sh", LETSENCRYPT_FOLDER);
    let staged = session.stage(
        "renew_le.sh",
        &TemplateContext::new().with("web_server", web),
        "renew.sh",
    )?;
    session.sudo(format!("mv {} {}", staged, renew))?;

    let crontab = format!("{}/crontab.sh", LETSENCRYPT_FOLDER);
    let staged = session.stage(
        "crontab_le.sh",
        &TemplateContext::new().with("le_path", LETSENCRYPT_FOLDER),
        "crontab.sh",
    )?;
    session.sudo(format!("mv {} {}", staged, crontab))?;

    session.sudo(format!("chmod +x {}", renew))?;
    session.sudo(format!("chmod +x {}", crontab))?;
    session.sudo(crontab.as_str())?;
    session.sudo(format!("rm {}", crontab))?;
    session.sudo("service cron restart")?;
    Ok(())
}

pub fn renew_certificates(session: &Session) -> WiseResult<()> {
    let web = session.config().web_server().service_name();
    session.reporter().section("Renewing certificates");
    session.sudo(format!("certbot renew {}", service_hooks(web)))?;
    Ok(())
}

fn service_hooks(web: &str) -> String {
    format!(
        "--pre-hook \"service {} stop\" --post-hook \"service {} start\"",
        web, web
    )
}
