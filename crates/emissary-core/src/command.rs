//! Command data model.
//!
//! A command carries its payload, an identity token assigned after
//! construction, an optional project context, and the completion callback
//! used by the programmatic delivery path. The callback slot is consumed on
//! first use, which is what enforces at-most-once invocation.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::envelope::ResponseEnvelope;
use crate::errors::CommandError;

/// Completion callback invoked for programmatic clients.
///
/// Receives `Ok(envelope)` on success and `Err(error)` on failure.
pub type CompletionCallback = Box<dyn FnOnce(Result<ResponseEnvelope, CommandError>) + Send>;

/// Opaque command identity token, used for tracking only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId(String);

impl CommandId {
    /// Wraps an externally generated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project context a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    root: Utf8PathBuf,
}

impl Project {
    /// Creates a project from its name and root directory.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// A command awaiting result delivery.
pub struct Command {
    payload: Value,
    id: Option<CommandId>,
    project: Option<Arc<Project>>,
    callback: Option<CompletionCallback>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("payload", &self.payload)
            .field("id", &self.id)
            .field("project", &self.project)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Command {
    /// Creates a command without a completion callback.
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            id: None,
            project: None,
            callback: None,
        }
    }

    /// Creates a command that delivers its outcome through `callback`.
    #[must_use]
    pub fn with_callback(payload: Value, callback: CompletionCallback) -> Self {
        Self {
            payload,
            id: None,
            project: None,
            callback: Some(callback),
        }
    }

    /// Returns the command payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Assigns the identity token. Expected to happen exactly once, after
    /// construction.
    pub fn assign_id(&mut self, id: CommandId) {
        debug_assert!(self.id.is_none(), "command id assigned twice");
        self.id = Some(id);
    }

    /// Returns the identity token, once assigned.
    #[must_use]
    pub fn id(&self) -> Option<&CommandId> {
        self.id.as_ref()
    }

    /// Associates the project the command runs against.
    pub fn set_project(&mut self, project: Arc<Project>) {
        self.project = Some(project);
    }

    /// Returns the associated project, if any.
    #[must_use]
    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }

    /// Whether the payload requests a UI, read from the nested `args.ui`
    /// boolean flag. Defaults to false when the path is absent or not a
    /// boolean.
    #[must_use]
    pub fn is_ui_command(&self) -> bool {
        self.payload
            .get("args")
            .and_then(|args| args.get("ui"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Consumes the completion callback. Subsequent calls observe `None`.
    pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.callback.take()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!({"args": {"ui": true}}), true)]
    #[case(json!({"args": {"ui": false}}), false)]
    #[case(json!({"args": {"ui": "yes"}}), false)]
    #[case(json!({"args": {}}), false)]
    #[case(json!({}), false)]
    #[case(json!(null), false)]
    fn reads_ui_flag(#[case] payload: Value, #[case] expected: bool) {
        assert_eq!(Command::new(payload).is_ui_command(), expected);
    }

    #[test]
    fn id_starts_unassigned() {
        let mut command = Command::new(json!({}));
        assert!(command.id().is_none());
        command.assign_id(CommandId::new("cmd-1"));
        assert_eq!(command.id().map(CommandId::as_str), Some("cmd-1"));
    }

    #[test]
    fn project_is_shared_not_owned() {
        let project = Arc::new(Project::new("demo", "/tmp/demo"));
        let mut command = Command::new(json!({}));
        command.set_project(Arc::clone(&project));
        assert_eq!(command.project().map(|p| p.name()), Some("demo"));
        assert_eq!(Arc::strong_count(&project), 2);
    }

    #[test]
    fn callback_slot_is_consumed_once() {
        let mut command = Command::with_callback(json!({}), Box::new(|_| {}));
        assert!(command.take_callback().is_some());
        assert!(command.take_callback().is_none());
    }
}
