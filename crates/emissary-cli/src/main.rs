//! CLI entrypoint for the Emissary command shell.
//!
//! The binary delegates to [`emissary_cli::run`], which parses arguments,
//! initialises telemetry, executes the requested operation, and converts
//! the core's termination request into a process exit code. Owning the
//! exit code here keeps the dispatch logic free of process-global side
//! effects.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    emissary_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
