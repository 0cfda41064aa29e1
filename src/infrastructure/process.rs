//! Child process plumbing shared by the SSH executor and the local shell.
//!
//! Four ways to run a command, picked from the `ShellCommand` flags:
//! - scripted: responders answer prompts read from the child's output
//! - attached: the operator's terminal is handed to the child
//! - hidden: stdout and stderr are captured
//! - visible: output is echoed while being captured
//!
//! Scripted ssh runs talk over pipes; `ssh -tt` puts the pseudo-terminal on
//! the remote side. Scripted local runs get their own pseudo-terminal from
//! [`run_shell_on_pty`], since prompts like ssh's go through `/dev/tty`.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use portable_pty::{native_pty_system, CommandBuilder, PtySize};

use crate::domain::ports::{CommandOutput, ShellCommand};
use crate::domain::value_objects::ResponderScript;

/// errno reported by a pty master once the slave side has closed (Linux)
const EIO: i32 = 5;

/// Run `process` according to the display flags of `command`.
///
/// `stdin_input` is written to the child's stdin before output is read
/// (used to feed `sudo -S`).
pub(crate) fn run(
    mut process: Command,
    command: &ShellCommand,
    stdin_input: Option<&str>,
) -> io::Result<CommandOutput> {
    if !command.responders.is_empty() {
        return run_scripted(process, command);
    }
    if command.pty {
        let status = process
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        return Ok(output_from(status, String::new(), String::new()));
    }

    process
        .stdin(if stdin_input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = process.spawn()?;
    if let Some(input) = stdin_input {
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }
    }

    if command.hide {
        let output = child.wait_with_output()?;
        return Ok(output_from(
            output.status,
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    run_visible(child)
}

fn run_visible(mut child: Child) -> io::Result<CommandOutput> {
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

    let (out, err) = std::thread::scope(|scope| {
        let err_reader = scope.spawn(move || tee(&mut stderr, &mut io::stderr()));
        let out = tee(&mut stdout, &mut io::stdout());
        let err = err_reader
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
        (out, err)
    });

    let status = child.wait()?;
    Ok(output_from(status, out?, err?))
}

/// Copy `source` to `sink` while keeping a lossy UTF-8 transcript.
fn tee(source: &mut impl Read, sink: &mut impl Write) -> io::Result<String> {
    let mut transcript = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = source.read(&mut buf)?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n])?;
        sink.flush()?;
        transcript.extend_from_slice(&buf[..n]);
    }
    Ok(String::from_utf8_lossy(&transcript).into_owned())
}

fn run_scripted(mut process: Command, command: &ShellCommand) -> io::Result<CommandOutput> {
    let mut child = process
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("child stdin was not captured"))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;

    let transcript = drive(&mut stdout, &mut stdin, command, &mut io::stdout())?;
    drop(stdin);

    let status = child.wait()?;
    Ok(output_from(status, transcript, String::new()))
}

/// Stream output, answering prompts as they show up.
pub(crate) fn drive(
    output: &mut impl Read,
    input: &mut impl Write,
    command: &ShellCommand,
    echo: &mut impl Write,
) -> io::Result<String> {
    let mut script = ResponderScript::new(&command.responders);
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = output.read(&mut buf)?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
        if !command.hide {
            echo.write_all(&buf[..n])?;
            echo.flush()?;
        }

        for response in script.feed(&raw) {
            input.write_all(response.as_bytes())?;
        }
        input.flush()?;
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Run `sh -c <line>` in `dir` as the session leader of a new pseudo-terminal,
/// answering the command's prompts.
///
/// stdout and stderr arrive merged in the transcript.
pub(crate) fn run_shell_on_pty(
    line: &str,
    dir: &Path,
    command: &ShellCommand,
) -> io::Result<CommandOutput> {
    let pair = native_pty_system()
        .openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(pty_error)?;

    let mut shell = CommandBuilder::new("sh");
    shell.arg("-c");
    shell.arg(line);
    shell.cwd(dir);
    let mut child = pair.slave.spawn_command(shell).map_err(pty_error)?;
    // the child holds the only slave handle, so reads end when it exits
    drop(pair.slave);

    let reader = pair.master.try_clone_reader().map_err(pty_error)?;
    let mut writer = pair.master.take_writer().map_err(pty_error)?;
    let transcript = drive(
        &mut PtyReader(reader),
        &mut writer,
        command,
        &mut io::stdout(),
    )?;
    drop(writer);

    let status = child.wait()?;
    Ok(CommandOutput {
        status: i32::try_from(status.exit_code()).ok(),
        stdout: transcript,
        stderr: String::new(),
    })
}

fn pty_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("pseudo-terminal: {}", e))
}

/// Turns the master's EIO after the child hangs up into end of file.
struct PtyReader<R>(R);

impl<R: Read> Read for PtyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.read(buf) {
            Err(e) if e.raw_os_error() == Some(EIO) => Ok(0),
            other => other,
        }
    }
}

fn output_from(status: ExitStatus, stdout: String, stderr: String) -> CommandOutput {
    CommandOutput {
        status: status.code(),
        stdout,
        stderr,
    }
}
