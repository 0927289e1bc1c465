//! Response envelope normalization.
//!
//! Heterogeneous raw results (sequence, keyed structure, plain string) are
//! folded into one `{result, success, stack?}` shape. The machine path
//! normalizes by shape; the programmatic path passes the raw value through
//! untouched because the embedding host is trusted to handle it.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{CommandError, DispatchError};

/// Normalized response structure delivered to consumers.
///
/// Absent fields are omitted from the serialized form, which is how a keyed
/// result that carries its own `success` key keeps it unmasked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Normalized result payload.
    ///
    /// On the machine path this stays unset for result shapes outside the
    /// recognized sequence/structure/string cases (numbers, booleans,
    /// null). That gap is carried over deliberately from the behaviour
    /// this layer replaces; such envelopes serialize as `{}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Computed success flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Diagnostic stack trace, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Computes the effective success flag for a `respond` call.
///
/// Defaults to `true` when the caller passed no flag. An error argument
/// forces failure regardless of the flag the caller passed.
pub(crate) fn effective_success(flag: Option<bool>, error: Option<&CommandError>) -> bool {
    flag.unwrap_or(true) && error.is_none()
}

impl ResponseEnvelope {
    /// Builds the machine-readable envelope for the headless path.
    ///
    /// Sequences and strings carry the computed success flag. A keyed
    /// structure only receives the flag when it does not already define a
    /// `success` key. A supplied error overrides the result with its
    /// message and populates the stack.
    #[must_use]
    pub fn machine(result: Value, flag: Option<bool>, error: Option<&CommandError>) -> Self {
        let success = effective_success(flag, error);
        let mut envelope = Self::default();
        match result {
            Value::Array(_) | Value::String(_) => {
                envelope.result = Some(result);
                envelope.success = Some(success);
            }
            Value::Object(map) => {
                envelope.success = (!map.contains_key("success")).then_some(success);
                envelope.result = Some(Value::Object(map));
            }
            // Numbers, booleans, and null leave `result` unset.
            _ => {}
        }
        if let Some(error) = error {
            envelope.result = Some(Value::String(error.message().to_owned()));
            envelope.stack = error.stack().map(ToOwned::to_owned);
            envelope.success = Some(false);
        }
        envelope
    }

    /// Builds the envelope for the programmatic path.
    ///
    /// The raw result passes through without shape normalization; only a
    /// supplied error replaces it with the failure message and stack.
    #[must_use]
    pub fn programmatic(result: Value, flag: Option<bool>, error: Option<&CommandError>) -> Self {
        let success = effective_success(flag, error);
        let mut envelope = Self {
            result: Some(result),
            success: Some(success),
            stack: None,
        };
        if let Some(error) = error {
            envelope.result = Some(Value::String(error.message().to_owned()));
            envelope.stack = error.stack().map(ToOwned::to_owned);
        }
        envelope
    }

    /// Serializes the envelope as a single JSON line and flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_jsonl<W: Write>(&self, writer: &mut W) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
