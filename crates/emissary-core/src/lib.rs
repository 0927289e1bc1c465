//! Result-delivery core for the Emissary command layer.
//!
//! A command finishes executing and calls [`ResponseDispatcher::respond`]
//! exactly once. The dispatcher reads the invoking client's capability
//! predicates and selects one of three mutually exclusive delivery
//! strategies:
//!
//! - **programmatic** — the outcome is handed to the command's completion
//!   callback (or returned synchronously when no callback is registered),
//! - **headless** — a single machine-readable JSON envelope is written to
//!   the injected output sink together with a termination request,
//! - **interactive** — the result is debug-logged and, on failure with a
//!   diagnostic stack, rendered as labelled trace sections on the error
//!   sink before termination is requested.
//!
//! The library never terminates the process itself: terminal paths return
//! an [`ExitRequest`] that the owning shell converts into an exit code.

mod client;
mod command;
mod dispatch;
mod envelope;
mod errors;
mod render;

pub use client::Client;
pub use command::{Command, CommandId, CompletionCallback, Project};
pub use dispatch::{
    DeliveryMode, DispatchOutcome, ExitReason, ExitRequest, ResponseDispatcher,
};
pub use envelope::ResponseEnvelope;
pub use errors::{CommandError, DispatchError};
