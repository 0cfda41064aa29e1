//! Wise CLI - provision and deploy Django projects over SSH

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wise::application::{Command, DispatchOutcome, Dispatcher, Toolkit};
use wise::infrastructure::{EmbeddedTemplates, LocalShell, SshConnector};
use wise::ui::{ConsoleReporter, DialoguerPrompter};

mod cli;

use cli::Cli;

/// Environment variable holding a tracing filter directive
const LOG_ENV_VAR: &str = "WISE_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let reporter = ConsoleReporter::detect();
    match run(cli, &reporter) {
        Ok(DispatchOutcome::Completed) => ExitCode::SUCCESS,
        Ok(DispatchOutcome::AuthenticationFailed { .. }) => ExitCode::from(1),
        Err(e) => {
            let mut message = e.to_string();
            for cause in e.chain().skip(1) {
                message.push_str(&format!("\n  caused by: {}", cause));
            }
            eprintln!("{}", reporter.format_error(&message));
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli, reporter: &ConsoleReporter) -> Result<DispatchOutcome> {
    let local = LocalShell::new(".");
    let templates = EmbeddedTemplates;
    let prompter = DialoguerPrompter::new();
    let tools = Toolkit {
        local: &local,
        templates: &templates,
        prompter: &prompter,
        reporter,
    };

    let command = Command::from(cli.command);
    let dispatcher = Dispatcher::new(&SshConnector, tools);
    let outcome = dispatcher.dispatch(&cli.file, &command)?;
    if outcome == DispatchOutcome::Completed {
        println!("{}", reporter.format_success(&format!("{} finished", command)));
    }
    Ok(outcome)
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
