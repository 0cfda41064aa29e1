//! Dispatcher: configuration checks, identities and authentication failures.

use std::fs;

use serde_json::json;

use wise::application::{Command, DispatchOutcome, Dispatcher, Phase, Toolkit};
use wise::domain::ports::Privilege;
use wise::infrastructure::EmbeddedTemplates;
use wise::WiseError;

use crate::common::*;

struct Rig {
    connector: FakeConnector,
    local: FakeLocal,
    prompter: ScriptedPrompter,
    reporter: RecordingReporter,
    templates: EmbeddedTemplates,
}

impl Rig {
    fn new(prompter: ScriptedPrompter) -> Self {
        Self {
            connector: FakeConnector::new(),
            local: FakeLocal::new(),
            prompter,
            reporter: RecordingReporter::new(),
            templates: EmbeddedTemplates,
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(
            &self.connector,
            Toolkit {
                local: &self.local,
                templates: &self.templates,
                prompter: &self.prompter,
                reporter: &self.reporter,
            },
        )
    }
}

#[test]
fn missing_config_never_connects() {
    let project = ProjectDir::empty();
    let rig = Rig::new(ScriptedPrompter::new());

    let err = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Deploy)
        .unwrap_err();

    assert!(matches!(err, WiseError::ConfigNotFound { .. }));
    assert_eq!(err.to_string(), format!("valid [{}] file is required", project.config_path().display()));
    assert!(rig.connector.connections().is_empty());
    assert!(rig.prompter.prompts().is_empty());
}

#[test]
fn privileged_command_prompts_and_connects_as_superuser() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new().with_password("s3cret"));

    let outcome = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Update)
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(
        rig.prompter.prompts(),
        vec!["Put your [SUDO] password for User [admin]"]
    );
    let connections = rig.connector.connections();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].user, "admin");
    assert_eq!(connections[0].host, "10.0.0.5");
    assert_eq!(connections[0].port, 22);
    assert_eq!(connections[0].sudo_password.as_deref(), Some("s3cret"));
    assert_eq!(connections[0].identity, project.path("id_rsa"));

    let commands = rig.connector.executor.commands();
    assert_eq!(commands[0].line, "uname");
    assert!(commands[0].warn && commands[0].hide);
    assert_eq!(commands[1].line, "apt-get update");
    assert_eq!(commands[1].privilege, Privilege::Root);
}

#[test]
fn unprivileged_command_connects_as_project_user() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new());

    rig.dispatcher()
        .dispatch(&project.config_path(), &Command::Migrate)
        .unwrap();

    let connections = rig.connector.connections();
    assert_eq!(connections[0].user, "acme");
    assert!(connections[0].sudo_password.is_none());
    assert!(rig.prompter.prompts().is_empty());
}

#[test]
fn local_only_command_skips_warm_up() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new());

    rig.dispatcher()
        .dispatch(&project.config_path(), &Command::AddRemote)
        .unwrap();

    assert!(rig.connector.executor.lines().is_empty());
    assert_eq!(rig.local.remotes().len(), 1);
}

#[test]
fn missing_ssh_key_fails_before_connecting() {
    let project = ProjectDir::new(acme_json());
    fs::remove_file(project.path("id_rsa.pub")).unwrap();
    let rig = Rig::new(ScriptedPrompter::new());

    let err = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Migrate)
        .unwrap_err();

    assert!(matches!(err, WiseError::SshKeyMissing { .. }));
    assert!(rig.connector.connections().is_empty());
}

#[test]
fn privileged_command_requires_superuser() {
    let project = ProjectDir::new(acme_with(json!({ "superuser": null })));
    let rig = Rig::new(ScriptedPrompter::new());

    let err = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Restart)
        .unwrap_err();

    assert!(matches!(err, WiseError::ConfigInvalid { .. }));
    assert!(rig.connector.connections().is_empty());
}

#[test]
fn authentication_failure_reports_remediation() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new());
    rig.connector.executor.reject_auth_on("manage.py");

    let dispatcher = rig.dispatcher();
    let outcome = dispatcher
        .dispatch(&project.config_path(), &Command::Migrate)
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::AuthenticationFailed { .. }));
    assert_eq!(
        rig.reporter
            .count(Level::Error, "Your ssh connection isn't configured correctly"),
        1
    );
    assert_eq!(
        rig.reporter
            .count(Level::Detail, "Set your private ssh_keyfile for [admin]"),
        1
    );
    assert_eq!(dispatcher.phase(), Phase::Idle);
}

#[test]
fn warm_up_authentication_failure_stops_before_command() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new());
    rig.connector.executor.reject_auth_on("uname");

    let outcome = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Migrate)
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::AuthenticationFailed { .. }));
    assert_eq!(rig.connector.executor.lines(), vec!["uname"]);
}

#[test]
fn unknown_keys_are_reported_as_warnings() {
    let project = ProjectDir::new(acme_with(json!({ "stage": "prod" })));
    let rig = Rig::new(ScriptedPrompter::new());

    rig.dispatcher()
        .dispatch(&project.config_path(), &Command::Migrate)
        .unwrap();

    assert_eq!(rig.reporter.count(Level::Warn, "unknown key 'stage'"), 1);
}

#[test]
fn cancelled_password_prompt_is_an_error() {
    let project = ProjectDir::new(acme_json());
    let rig = Rig::new(ScriptedPrompter::new());

    let err = rig
        .dispatcher()
        .dispatch(&project.config_path(), &Command::Deps)
        .unwrap_err();

    assert!(matches!(err, WiseError::Prompt { .. }));
    assert!(rig.connector.connections().is_empty());
}
