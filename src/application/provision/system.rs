use crate::application::session::Session;
use crate::domain::ports::ShellCommand;
use crate::error::WiseResult;

const LOCALE_VARS: [&str; 3] = ["LANG", "LC_CTYPE", "LC_ALL"];
const FALLBACK_LOCALE: &str = "C.UTF-8";

pub fn update_system(session: &Session) -> WiseResult<()> {
    session.reporter().section("Updating system packages");
    session.sudo("apt-get update")?;
    session.sudo("apt-get upgrade -y")?;
    Ok(())
}

/// Pin every locale variable that is not UTF-8 in `/etc/environment`
pub fn check_language(session: &Session) -> WiseResult<()> {
    session.reporter().section("Checking locale");
    for var in LOCALE_VARS {
        let value = session
            .exec(ShellCommand::run(format!("echo ${}", var)).hide())?
            .stdout
            .trim()
            .to_string();
        if is_utf8_locale(&value) {
            session.reporter().detail(&format!("{}={}", var, value));
            continue;
        }
        session
            .reporter()
            .detail(&format!("{} is [{}], setting {}", var, value, FALLBACK_LOCALE));
        session.sudo(format!(
            "echo \"{}={}\" >> /etc/environment",
            var, FALLBACK_LOCALE
        ))?;
    }
    Ok(())
}

fn is_utf8_locale(value: &str) -> bool {
    let v = value.to_ascii_lowercase();
    v.ends_with(".utf-8") || v.ends_with(".utf8")
}
