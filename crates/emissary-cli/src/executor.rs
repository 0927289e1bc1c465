//! Minimal built-in operations.
//!
//! These stand in for the concrete commands of a full tool so every
//! delivery path of the dispatch contract is reachable from a real
//! process. Anything beyond this table belongs to the embedding tool, not
//! to the result-delivery layer.

use serde_json::{Value, json};

use emissary_core::CommandError;

/// Executes a built-in operation.
///
/// # Errors
///
/// Returns a [`CommandError`] when the operation itself fails (`fail`) or
/// is unknown. The `fail` error carries a diagnostic stack so the
/// interactive path has something to render.
pub(crate) fn execute(operation: &str, arguments: &[String]) -> Result<Value, CommandError> {
    match operation {
        "ping" => Ok(Value::String(String::from("pong"))),
        "echo" => Ok(Value::Array(
            arguments
                .iter()
                .map(|argument| Value::String(argument.clone()))
                .collect(),
        )),
        "describe" => Ok(json!({
            "operation": "describe",
            "arguments": arguments.len(),
        })),
        "fail" => {
            let message = arguments
                .first()
                .map_or("requested failure", String::as_str);
            Err(CommandError::with_stack(
                message,
                format!("Error: {message}\n  at emissary::ops::fail"),
            ))
        }
        unknown => Err(CommandError::new(format!("unknown operation: {unknown}"))),
    }
}
