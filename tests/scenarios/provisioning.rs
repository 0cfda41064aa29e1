//! Provisioning steps against a recording executor.

use serde_json::json;

use wise::application::{provision, Command};
use wise::domain::ports::{CommandOutput, Privilege};
use wise::WiseError;

use crate::common::*;

#[test]
fn layout_creates_fixed_tree_owned_by_project() {
    let h = Harness::new(acme_json());

    provision::layout(&h.session()).unwrap();

    let lines = h.executor.lines();
    assert_eq!(lines.len(), 2);
    insta::assert_snapshot!(lines[0], @"mkdir -p /srv/acme /srv/acme/code/ /srv/acme/repo/ /srv/acme/etc/ /srv/acme/etc/nginx/ /srv/acme/etc/ssl/ /srv/acme/log/ /srv/acme/bin/ /srv/acme/htdocs/ /srv/acme/htdocs/media/ /srv/acme/htdocs/static/");
    assert_eq!(lines[1], "chown -R acme:workload /srv/acme");
    assert!(h
        .executor
        .commands()
        .iter()
        .all(|c| c.privilege == Privilege::Root));
}

#[test]
fn docker_layout_adds_volumes() {
    let h = Harness::new(acme_with(json!({ "deployment": "docker" })));

    provision::layout(&h.session()).unwrap();

    assert!(h.executor.lines()[0].ends_with(" /srv/acme/volumes/"));
}

#[test]
fn postgres_create_twice_reports_existing_db_and_role() {
    let h = Harness::new(acme_json());
    h.executor
        .fail_on_repeat("CREATE DATABASE")
        .fail_on_repeat("CREATE USER");
    let session = h.session();

    provision::create_db(&session).unwrap();
    provision::create_db(&session).unwrap();

    assert_eq!(h.reporter.count(Level::Detail, "DB already exists"), 1);
    assert_eq!(h.reporter.count(Level::Detail, "DB User already exists"), 1);

    let commands = h.executor.commands();
    assert_eq!(commands.len(), 4);
    assert_eq!(commands[0].line, "psql -c 'CREATE DATABASE acme;'");
    assert_eq!(
        commands[1].line,
        r#"psql -c 'CREATE USER acme WITH ENCRYPTED PASSWORD '\''x'\'';'"#
    );
    assert!(commands[1].sensitive);
    assert!(commands
        .iter()
        .all(|c| c.privilege == Privilege::As("postgres".to_string()) && c.warn));
}

#[test]
fn postgres_password_is_quoted_for_sql_and_shell() {
    let h = Harness::new(acme_with(json!({ "password": "it's $HOME\"" })));

    provision::create_db(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines()[1],
        r#"psql -c 'CREATE USER acme WITH ENCRYPTED PASSWORD '\''it'\'''\''s $HOME"'\'';'"#
    );
}

#[test]
fn mysql_is_not_implemented() {
    let h = Harness::new(acme_with(json!({ "db_engine": "mysql" })));

    let err = provision::create_db(&h.session()).unwrap_err();

    assert!(matches!(err, WiseError::NotImplemented { .. }));
    assert!(h.executor.lines().is_empty());
}

#[test]
fn sqlite_is_unsupported() {
    let h = Harness::new(acme_with(json!({ "db_engine": "sqlite" })));

    let err = provision::create_db(&h.session()).unwrap_err();

    assert!(matches!(
        err,
        WiseError::UnsupportedOption { ref value, .. } if value == "sqlite"
    ));
}

#[test]
fn reset_db_drops_then_creates() {
    let h = Harness::new(acme_json());

    provision::reset_db(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines(),
        vec![
            "psql -c 'DROP DATABASE acme;'",
            "psql -c 'DROP ROLE IF EXISTS acme;'",
            "psql -c 'CREATE DATABASE acme;'",
            r#"psql -c 'CREATE USER acme WITH ENCRYPTED PASSWORD '\''x'\'';'"#,
        ]
    );
}

#[test]
fn letsencrypt_without_https_only_reports() {
    let h = Harness::new(acme_json());

    provision::letsencrypt(&h.session()).unwrap();

    assert!(h.executor.lines().is_empty());
    assert!(h.executor.uploads().is_empty());
    assert_eq!(h.reporter.count(Level::Detail, "skipping certificate"), 1);
}

#[test]
fn letsencrypt_issues_certificate_and_registers_renewal() {
    let h = Harness::new(acme_with(json!({ "https": true })));

    provision::letsencrypt(&h.session()).unwrap();

    let lines = h.executor.lines();
    assert_eq!(
        lines[0],
        "certbot certonly --standalone --agree-tos --email team@xiberty.com --domains \"acme.test\" \
         --pre-hook \"service nginx stop\" --post-hook \"service nginx start\""
    );
    assert!(lines.contains(&"chmod -R go-rwx /etc/letsencrypt/live/acme.test".to_string()));
    assert!(lines.contains(&"mv /tmp/renew.sh /opt/letsencrypt/renew.sh".to_string()));
    assert!(lines.contains(&"/opt/letsencrypt/crontab.sh".to_string()));
    assert_eq!(lines.last().unwrap(), "service cron restart");

    let renew = h.executor.upload_to("/tmp/renew.sh").unwrap();
    assert!(renew.content.contains("service nginx stop"));
    let cron = h.executor.upload_to("/tmp/crontab.sh").unwrap();
    assert!(cron.content.contains("/opt/letsencrypt/renew.sh"));
}

#[test]
fn nginx_site_is_rendered_and_enabled() {
    let h = Harness::new(acme_json());

    provision::configure_web_server(&h.session()).unwrap();

    let site = h.executor.upload_to("/tmp/acme.conf").unwrap();
    assert!(site.content.contains("server_name acme.test;"));
    assert!(site.content.contains("alias /srv/acme/htdocs/static/;"));
    assert!(!site.content.contains("listen 443"));

    let lines = h.executor.lines();
    assert_eq!(lines[0], "rm /etc/nginx/sites-enabled/default");
    assert!(lines.contains(&"mv /tmp/acme.conf /etc/nginx/sites-available/acme.conf".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "ln -s /etc/nginx/sites-available/acme.conf /etc/nginx/sites-enabled/"
    );
}

#[test]
fn nginx_ssl_site_when_https_enabled() {
    let h = Harness::new(acme_with(json!({ "https": true })));

    provision::configure_web_server(&h.session()).unwrap();

    let site = h.executor.upload_to("/tmp/acme.conf").unwrap();
    assert!(site.content.contains("listen 443 ssl;"));
    assert!(site.content.contains("/etc/letsencrypt/live/acme.test/fullchain.pem"));
}

#[test]
fn apache_is_unsupported() {
    let h = Harness::new(acme_with(json!({ "web_server": "apache" })));

    let err = provision::configure_web_server(&h.session()).unwrap_err();

    assert!(matches!(err, WiseError::UnsupportedOption { .. }));
    assert!(h.executor.lines().is_empty());
}

#[test]
fn add_remote_twice_leaves_one_production_remote() {
    let h = Harness::new(acme_json());
    let session = h.session();

    provision::add_remote(&session).unwrap();
    provision::add_remote(&session).unwrap();

    let remotes = h.local.remotes();
    assert_eq!(remotes.len(), 1);
    assert_eq!(
        remotes.get("production").map(String::as_str),
        Some("acme@acme.test:/srv/acme/repo/acme.git")
    );
    assert!(h.executor.lines().is_empty());
}

#[test]
fn add_remote_falls_back_to_ip_without_domain() {
    let h = Harness::new(acme_with(json!({ "domain": "" })));

    provision::add_remote(&h.session()).unwrap();

    assert_eq!(
        h.local.remotes().get("production").map(String::as_str),
        Some("acme@10.0.0.5:/srv/acme/repo/acme.git")
    );
}

#[test]
fn create_user_skips_existing_account() {
    let h = Harness::new(acme_json());

    provision::create_user(&h.session()).unwrap();

    assert_eq!(h.executor.lines(), vec!["id -u acme", "mkdir -p /srv"]);
    assert_eq!(h.reporter.count(Level::Detail, "already exists"), 1);
}

#[test]
fn create_user_sets_password_interactively() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("id -u acme", CommandOutput::failure(1, "no such user"));

    provision::create_user(&h.session()).unwrap();

    let commands = h.executor.commands();
    assert_eq!(commands[1].line, "adduser acme --disabled-password --gecos \"\"");
    let passwd = &commands[2];
    assert_eq!(passwd.line, "passwd acme");
    assert!(passwd.pty);
    let patterns: Vec<&str> = passwd.responders.iter().map(|r| r.pattern()).collect();
    assert_eq!(patterns, vec!["New password:", "Retype new password:"]);
    assert!(passwd.responders.iter().all(|r| r.response() == "x\n"));
}

#[test]
fn teardown_attempts_every_step() {
    let h = Harness::new(acme_with(json!({ "db_engine": "mysql" })));
    h.executor.respond_to("", CommandOutput::failure(1, "nope"));

    provision::teardown(&h.session()).unwrap();

    let lines = h.executor.lines();
    assert_eq!(lines.first().unwrap(), "pkill -u acme");
    assert_eq!(lines.last().unwrap(), "rm -rf /srv/acme");
    assert!(lines.contains(&"userdel -r acme".to_string()));
    assert!(lines.contains(&"rm -rf /srv/acme/bin/acme.socket".to_string()));
    assert_eq!(h.reporter.count(Level::Warn, "mysql"), 1);
}

#[test]
fn dependencies_for_focal() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("lsb_release -sc", CommandOutput::success("focal\n"));

    provision::install_dependencies(&h.session()).unwrap();

    let lines = h.executor.lines();
    assert!(lines[1].starts_with("apt install -y build-essential git"));
    assert!(lines[1].ends_with("python3-distutils"));
    assert!(lines.contains(&"apt install -y postgresql postgresql-contrib libpq-dev".to_string()));
    assert!(lines.contains(&"apt install -y nginx".to_string()));
    assert_eq!(lines.last().unwrap(), "adduser admin workload");
    assert!(!lines.iter().any(|l| l.contains("certbot")));
}

#[test]
fn dependencies_install_certbot_with_https() {
    let h = Harness::new(acme_with(json!({ "https": true })));
    h.executor
        .respond_to("lsb_release -sc", CommandOutput::success("jammy\n"));

    provision::install_dependencies(&h.session()).unwrap();

    assert!(h
        .executor
        .lines()
        .contains(&"apt install -y certbot".to_string()));
}

#[test]
fn dependencies_without_package_list_fail() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("lsb_release -sc", CommandOutput::success("buster\n"));

    let err = provision::install_dependencies(&h.session()).unwrap_err();

    assert!(matches!(
        err,
        WiseError::MissingPackageList { ref codename } if codename == "buster"
    ));
    assert_eq!(h.executor.lines().len(), 1);
}

#[test]
fn check_language_pins_non_utf8_variables() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("echo $LANG", CommandOutput::success("en_US.UTF-8\n"));

    provision::check_language(&h.session()).unwrap();

    let appended: Vec<String> = h
        .executor
        .lines()
        .into_iter()
        .filter(|l| l.contains("/etc/environment"))
        .collect();
    assert_eq!(
        appended,
        vec![
            "echo \"LC_CTYPE=C.UTF-8\" >> /etc/environment",
            "echo \"LC_ALL=C.UTF-8\" >> /etc/environment",
        ]
    );
}

#[test]
fn restart_bounces_web_server_and_project() {
    let h = Harness::new(acme_json());

    provision::restart_services(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines(),
        vec![
            "supervisorctl reread",
            "supervisorctl update",
            "service nginx restart",
            "service supervisor restart",
            "supervisorctl restart acme",
        ]
    );
}

#[test]
fn repository_hook_points_at_code_dir() {
    let h = Harness::new(acme_json());

    provision::setup_repository(&h.session()).unwrap();

    let commands = h.executor.commands();
    assert_eq!(commands[0].line, "mkdir -p /srv/acme/repo/acme.git");
    assert_eq!(commands[0].privilege, Privilege::As("acme".to_string()));
    assert_eq!(commands[1].line, "git init --bare --shared /srv/acme/repo/acme.git");

    let hook = h.executor.upload_to("/tmp/post-receive").unwrap();
    assert!(hook.content.contains("--work-tree=/srv/acme/code/"));
    assert_eq!(
        h.executor.lines().last().unwrap(),
        "chown -R acme:workload /srv/acme/repo/acme.git"
    );
}

#[test]
fn start_script_and_supervisor_program() {
    let h = Harness::new(acme_json());
    let session = h.session();

    provision::write_start_script(&session).unwrap();
    provision::configure_supervisor(&session).unwrap();

    let script = h.executor.upload_to("/tmp/start.sh").unwrap();
    assert!(script.content.contains("DJANGODIR=/srv/acme/code/"));
    assert!(script.content.contains("USER=acme"));
    let program = h.executor.upload_to("/tmp/acme.conf").unwrap();
    assert!(program.content.contains("[program:acme]"));
    assert!(program.content.contains("group = workload"));

    let lines = h.executor.lines();
    assert!(lines.contains(&"chmod +x /srv/acme/bin/start.sh".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "mv /tmp/acme.conf /etc/supervisor/conf.d/acme.conf"
    );
}

#[test]
fn fatal_failure_stops_the_step() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("apt-get update", CommandOutput::failure(100, "E: offline"));

    let err = provision::update_system(&h.session()).unwrap_err();

    assert!(matches!(
        err,
        WiseError::RemoteCommandFailed { status: Some(100), .. }
    ));
    assert_eq!(h.executor.lines(), vec!["apt-get update"]);
}

#[test]
fn create_group_tolerates_existing_group_and_user() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to(
            "groupadd",
            CommandOutput::failure(9, "groupadd: group 'workload' already exists"),
        )
        .respond_to(
            "useradd",
            CommandOutput::failure(9, "useradd: user 'acme' already exists"),
        );

    provision::create_group(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines(),
        vec![
            "groupadd --system workload",
            "useradd --system --gid workload --shell /bin/bash --home /srv/acme acme",
        ]
    );
    assert!(h
        .executor
        .commands()
        .iter()
        .all(|c| c.privilege == Privilege::Root && c.warn));
}

#[test]
fn fix_permissions_resets_owner_and_group_write() {
    let h = Harness::new(acme_json());
    h.executor
        .respond_to("chown", CommandOutput::failure(1, "Operation not permitted"));

    provision::fix_permissions(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines(),
        vec!["chown -R acme:workload /srv/acme", "chmod -R g+w /srv/acme"]
    );
    assert!(h
        .executor
        .commands()
        .iter()
        .all(|c| c.privilege == Privilege::Root && c.warn && c.hide));
}

#[test]
fn update_system_refreshes_then_upgrades() {
    let h = Harness::new(acme_json());

    provision::update_system(&h.session()).unwrap();

    assert_eq!(
        h.executor.lines(),
        vec!["apt-get update", "apt-get upgrade -y"]
    );
    assert!(h
        .executor
        .commands()
        .iter()
        .all(|c| c.privilege == Privilege::Root && !c.warn));
}

#[test]
fn update_system_stops_when_refresh_fails() {
    let h = Harness::new(acme_json());
    h.executor.respond_to(
        "apt-get update",
        CommandOutput::failure(100, "E: Could not get lock"),
    );

    let err = provision::update_system(&h.session()).unwrap_err();

    assert!(matches!(err, WiseError::RemoteCommandFailed { .. }));
    assert_eq!(h.executor.lines(), vec!["apt-get update"]);
}

#[test]
fn install_runs_provisioning_in_order() {
    let h = Harness::new(acme_with(json!({ "https": true })));
    h.executor
        .respond_to("lsb_release -sc", CommandOutput::success("jammy\n"));

    Command::Install.execute(&h.session()).unwrap();

    let lines = h.executor.lines();
    let at = |what: &str, pred: fn(&str) -> bool| position(&lines, what, pred);

    let steps = [
        at("dependencies", |l| l == "lsb_release -sc"),
        at("user", |l| l == "id -u acme"),
        at("group", |l| l == "groupadd --system workload"),
        at("layout", |l| l.starts_with("mkdir -p /srv/acme /srv/acme/code/")),
        at("database", |l| l.contains("CREATE DATABASE acme;")),
        at("permissions", |l| l == "chmod -R g+w /srv/acme"),
        at("repository", |l| l.starts_with("git init --bare --shared")),
        at("web server", |l| l.starts_with("ln -s /etc/nginx/sites-available/acme.conf")),
        at("start script", |l| l == "chmod +x /srv/acme/bin/start.sh"),
        at("supervisor", |l| l == "mv /tmp/acme.conf /etc/supervisor/conf.d/acme.conf"),
        at("certificate", |l| l.starts_with("certbot certonly")),
    ];
    assert!(
        steps.windows(2).all(|pair| pair[0] < pair[1]),
        "steps out of order: {:?}",
        steps
    );

    let permissions: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.as_str() == "chmod -R g+w /srv/acme")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(permissions.len(), 2);
    assert!(permissions[1] > steps[9] && permissions[1] < steps[10]);
    assert_eq!(lines.last().unwrap(), "service cron restart");

    assert_eq!(
        h.local.remotes().get("production").map(String::as_str),
        Some("acme@acme.test:/srv/acme/repo/acme.git")
    );
}

fn position(lines: &[String], what: &str, pred: fn(&str) -> bool) -> usize {
    lines
        .iter()
        .position(|l| pred(l.as_str()))
        .unwrap_or_else(|| panic!("no {} command in {:#?}", what, lines))
}
