//! Command shell runtime for Emissary.
//!
//! The shell is deliberately thin: it parses the invocation flags,
//! initialises telemetry, runs one built-in operation, and hands the
//! outcome to the core dispatcher. Its one real responsibility is owning
//! the process-exit mechanism — the core returns an explicit termination
//! request and the shell converts it into an exit code. The interface is
//! exercised both from the binary entrypoint and from tests where the IO
//! streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use emissary_core::{
    Command, CommandId, DispatchError, DispatchOutcome, Project, ResponseDispatcher,
};

mod cli;
mod client;
mod executor;
mod telemetry;

use cli::Cli;
use client::TerminalClient;
use telemetry::TelemetryError;

/// Tracing target for shell events.
const SHELL_TARGET: &str = "emissary::shell";

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Usage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to deliver command response: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Runs the shell using the provided arguments and IO handles.
#[must_use]
pub fn run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    match run_command(args, stdout, stderr) {
        Ok(status) => exit_code_from_status(status),
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn run_command<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> Result<i32, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::Usage)?;
    let filter = cli
        .log_filter
        .clone()
        .unwrap_or_else(|| default_filter(cli.verbose).to_owned());
    telemetry::initialise(&filter, cli.log_format)?;

    let client = TerminalClient::new(cli.headless, cli.verbose);
    let mut command = Command::new(json!({
        "operation": cli.operation,
        "args": { "arguments": cli.arguments },
    }));
    command.assign_id(CommandId::new(format!("cli-{}", std::process::id())));
    if let Some(root) = cli.project.as_ref() {
        let name = root.file_name().unwrap_or("project").to_owned();
        command.set_project(Arc::new(Project::new(name, root.clone())));
    }

    debug!(target: SHELL_TARGET, operation = %cli.operation, "executing operation");
    let (result, success, error) = match executor::execute(&cli.operation, &cli.arguments) {
        Ok(result) => (result, None, None),
        Err(error) => (Value::Null, Some(false), Some(error)),
    };

    let outcome = ResponseDispatcher::new(&client, stdout, stderr)
        .respond(&mut command, result, success, error)?;
    Ok(match outcome {
        DispatchOutcome::Terminate(request) => request.status,
        // A command-line client always routes to a terminal path; the
        // programmatic outcomes cannot occur here.
        DispatchOutcome::Delivered | DispatchOutcome::Returned(_) => 0,
    })
}

const fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn exit_code_from_status(status: i32) -> ExitCode {
    if (0..=255).contains(&status) {
        ExitCode::from(status as u8)
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sinks {
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    }

    fn run_shell(args: &[&str]) -> (Result<i32, AppError>, Sinks) {
        let mut sinks = Sinks {
            stdout: Vec::new(),
            stderr: Vec::new(),
        };
        let status = run_command(args.iter().copied(), &mut sinks.stdout, &mut sinks.stderr);
        (status, sinks)
    }

    #[test]
    fn headless_ping_emits_one_json_line() {
        let (status, sinks) = run_shell(&["emissary", "--headless", "ping"]);
        assert_eq!(status.expect("run"), 0);
        assert_eq!(
            String::from_utf8(sinks.stdout).expect("utf8"),
            "{\"result\":\"pong\",\"success\":true}\n"
        );
        assert!(sinks.stderr.is_empty());
    }

    #[test]
    fn headless_failure_uses_error_sink_and_status_one() {
        let (status, sinks) = run_shell(&["emissary", "--headless", "fail", "boom"]);
        assert_eq!(status.expect("run"), 1);
        assert!(sinks.stdout.is_empty());
        let line = String::from_utf8(sinks.stderr).expect("utf8");
        assert!(line.contains("\"result\":\"boom\""));
        assert!(line.contains("\"success\":false"));
        assert!(line.contains("\"stack\":"));
    }

    #[test]
    fn interactive_unknown_operation_exits_clean_without_stack() {
        // The interactive exit status tracks stack presence; an unknown
        // operation carries no stack, so the shell still exits cleanly.
        let (status, sinks) = run_shell(&["emissary", "bogus"]);
        assert_eq!(status.expect("run"), 0);
        assert!(sinks.stdout.is_empty());
    }

    #[test]
    fn interactive_failure_with_stack_renders_sections() {
        let (status, sinks) = run_shell(&["emissary", "fail", "boom"]);
        assert_eq!(status.expect("run"), 1);
        let rendered = String::from_utf8(sinks.stderr).expect("utf8");
        assert!(rendered.contains("Promise Trace -->"));
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("Stack Trace -->"));
    }

    #[test]
    fn usage_errors_map_to_failure_exit() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(["emissary"], &mut stdout, &mut stderr);
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
        assert!(!stderr.is_empty());
    }

    #[test]
    fn out_of_range_status_maps_to_failure() {
        assert_eq!(
            format!("{:?}", exit_code_from_status(-1)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }
}
