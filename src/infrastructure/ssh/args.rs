//! Argument construction for the OpenSSH client.
//!
//! Kept free of I/O so the exact command lines can be unit tested.

use std::path::Path;

use crate::domain::ports::{Privilege, ShellCommand};

/// Prompt printed by sudo when a pseudo-terminal is attached.
pub const SUDO_PROMPT: &str = "[sudo] password: ";

/// How sudo obtains the password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudoAuth {
    /// Password is written to stdin (`sudo -S`)
    Stdin,
    /// sudo prompts on the terminal; a responder answers
    Prompt,
    /// No password known; fail instead of prompting (`sudo -n`)
    NonInteractive,
}

/// Quote a string for safe use in a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// The line the remote login shell runs for `command`
pub fn remote_line(command: &ShellCommand, auth: SudoAuth) -> String {
    let inner = match &command.cwd {
        Some(dir) => format!("cd {} && {}", shell_quote(dir), command.line),
        None => command.line.clone(),
    };

    // sudo -S leaves the password line unread when it needs none
    let inner = match (auth, command.privilege.is_elevated()) {
        (SudoAuth::Stdin, true) => format!("exec </dev/null; {}", inner),
        _ => inner,
    };

    let sudo_flags = match auth {
        SudoAuth::Stdin => "-S -p ''".to_string(),
        SudoAuth::Prompt => format!("-p {}", shell_quote(SUDO_PROMPT)),
        SudoAuth::NonInteractive => "-n".to_string(),
    };

    match &command.privilege {
        Privilege::Login => inner,
        Privilege::Root => format!("sudo {} -H sh -c {}", sudo_flags, shell_quote(&inner)),
        Privilege::As(user) => format!(
            "sudo {} -u {} -H sh -c {}",
            sudo_flags,
            shell_quote(user),
            shell_quote(&inner)
        ),
    }
}

/// Options shared by ssh and scp
pub fn common_options(identity: &Path, control_path: Option<&Path>) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        identity.display().to_string(),
        "-o".to_string(),
        "BatchMode=yes".to_string(),
        "-o".to_string(),
        "StrictHostKeyChecking=accept-new".to_string(),
    ];
    if let Some(path) = control_path {
        args.extend([
            "-o".to_string(),
            "ControlMaster=auto".to_string(),
            "-o".to_string(),
            format!("ControlPath={}", path.display()),
            "-o".to_string(),
            "ControlPersist=60".to_string(),
        ]);
    }
    args
}

/// Full `ssh` argument list (program name excluded)
pub fn ssh_args(
    destination: &str,
    port: u16,
    identity: &Path,
    control_path: Option<&Path>,
    pty: bool,
    line: &str,
) -> Vec<String> {
    let mut args = vec!["-p".to_string(), port.to_string()];
    args.extend(common_options(identity, control_path));
    if pty {
        args.push("-tt".to_string());
    }
    args.push(destination.to_string());
    args.push(line.to_string());
    args
}

/// Full `scp` argument list (program name excluded)
pub fn scp_args(
    destination: &str,
    port: u16,
    identity: &Path,
    control_path: Option<&Path>,
    local: &Path,
    remote: &str,
) -> Vec<String> {
    let mut args = vec!["-q".to_string(), "-P".to_string(), port.to_string()];
    args.extend(common_options(identity, control_path));
    args.push(local.display().to_string());
    args.push(format!("{}:{}", destination, remote));
    args
}
