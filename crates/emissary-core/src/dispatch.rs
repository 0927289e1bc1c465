//! The `respond` contract: response dispatch by client capability.
//!
//! Exactly one delivery strategy runs per call, selected once from the
//! client's capability predicates and never inferred mid-flow. Terminal
//! strategies do not exit the process; they return an [`ExitRequest`] the
//! owning shell converts into an exit code, keeping the dispatch logic
//! unit-testable.

use std::io::Write;

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::command::Command;
use crate::envelope::{ResponseEnvelope, effective_success};
use crate::errors::{CommandError, DispatchError};
use crate::render::write_stack_sections;

/// Tracing target for dispatch events.
pub(crate) const RESPOND_TARGET: &str = "emissary::respond";

/// Delivery strategy selected from the client capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Deliver through the completion callback; control returns to the
    /// caller and the process keeps running.
    Programmatic,
    /// One machine-readable JSON line plus a definitive exit status.
    Headless,
    /// Human-oriented diagnostics plus an exit status.
    Interactive,
}

impl DeliveryMode {
    /// Selects the delivery mode for a client, in priority order: any
    /// non-command-line client is programmatic; a headless command-line
    /// client without debugging takes the machine channel; everything else
    /// is interactive.
    pub fn for_client<C: Client + ?Sized>(client: &C) -> Self {
        if !client.is_command_line() {
            Self::Programmatic
        } else if client.is_headless() && !client.is_debugging() {
            Self::Headless
        } else {
            Self::Interactive
        }
    }
}

/// Reason attached to a termination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The command outcome was delivered cleanly.
    Completed,
    /// The command failed and the failure was delivered.
    CommandFailed,
}

/// Explicit process-termination request returned to the owning shell.
///
/// The dispatcher never terminates the process itself; the binary maps the
/// request onto `std::process::ExitCode` after dispatch returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRequest {
    /// Requested process exit status.
    pub status: i32,
    /// Why termination was requested.
    pub reason: ExitReason,
}

impl ExitRequest {
    pub(crate) const fn success() -> Self {
        Self {
            status: 0,
            reason: ExitReason::Completed,
        }
    }

    pub(crate) const fn failure() -> Self {
        Self {
            status: 1,
            reason: ExitReason::CommandFailed,
        }
    }
}

/// Outcome of a single `respond` call.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The completion callback was invoked exactly once.
    Delivered,
    /// No callback was registered; the envelope is handed back
    /// synchronously instead.
    Returned(ResponseEnvelope),
    /// A terminal delivery path completed; the shell must exit.
    Terminate(ExitRequest),
}

/// The `respond` contract bound to a client and its output sinks.
///
/// The sinks are injected writers rather than process-global streams so
/// the machine channel stays testable and uncorrupted by diagnostics.
pub struct ResponseDispatcher<'a, C, W, E> {
    client: &'a C,
    stdout: &'a mut W,
    stderr: &'a mut E,
}

impl<'a, C, W, E> ResponseDispatcher<'a, C, W, E>
where
    C: Client,
    W: Write,
    E: Write,
{
    /// Binds the dispatcher to a client and its output sinks.
    pub fn new(client: &'a C, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            client,
            stdout,
            stderr,
        }
    }

    /// Delivers a command outcome through exactly one strategy.
    ///
    /// External collaborators must guarantee `respond` runs at most once
    /// per command; a second programmatic call finds the callback slot
    /// already consumed and falls back to the synchronous return.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when serializing the envelope or writing
    /// to a sink fails.
    pub fn respond(
        &mut self,
        command: &mut Command,
        result: Value,
        success: Option<bool>,
        error: Option<CommandError>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let mode = DeliveryMode::for_client(self.client);
        debug!(target: RESPOND_TARGET, ?mode, id = ?command.id(), "dispatching response");
        match mode {
            DeliveryMode::Programmatic => {
                Ok(Self::respond_programmatic(command, result, success, error))
            }
            DeliveryMode::Headless => self.respond_headless(result, success, error),
            DeliveryMode::Interactive => self.respond_interactive(&result, success, error),
        }
    }

    fn respond_programmatic(
        command: &mut Command,
        result: Value,
        success: Option<bool>,
        error: Option<CommandError>,
    ) -> DispatchOutcome {
        match command.take_callback() {
            Some(callback) => {
                if effective_success(success, error.as_ref()) {
                    callback(Ok(ResponseEnvelope::programmatic(result, success, None)));
                } else {
                    let error = error.unwrap_or_else(|| {
                        CommandError::new("command reported failure without an error")
                    });
                    callback(Err(error));
                }
                DispatchOutcome::Delivered
            }
            None => DispatchOutcome::Returned(ResponseEnvelope::programmatic(
                result,
                success,
                error.as_ref(),
            )),
        }
    }

    fn respond_headless(
        &mut self,
        result: Value,
        success: Option<bool>,
        error: Option<CommandError>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let envelope = ResponseEnvelope::machine(result, success, error.as_ref());
        match error {
            Some(error) => {
                debug!(target: RESPOND_TARGET, %error, "command failed; envelope to error sink");
                envelope.write_jsonl(self.stderr)?;
                Ok(DispatchOutcome::Terminate(ExitRequest::failure()))
            }
            None => {
                envelope.write_jsonl(self.stdout)?;
                Ok(DispatchOutcome::Terminate(ExitRequest::success()))
            }
        }
    }

    fn respond_interactive(
        &mut self,
        result: &Value,
        success: Option<bool>,
        error: Option<CommandError>,
    ) -> Result<DispatchOutcome, DispatchError> {
        debug!(target: RESPOND_TARGET, %result, "command result");
        if !effective_success(success, error.as_ref()) {
            if let Some(stack) = error.as_ref().and_then(CommandError::stack) {
                write_stack_sections(self.stderr, stack)?;
                return Ok(DispatchOutcome::Terminate(ExitRequest::failure()));
            }
        }
        // Exit status on this path tracks stack presence, not the success
        // flag: a failure without a usable stack still terminates cleanly.
        Ok(DispatchOutcome::Terminate(ExitRequest::success()))
    }
}
