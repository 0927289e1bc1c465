//! Capability predicates exposed by the invoking client.

/// Capability predicates describing how the invoking client expects to
/// receive command results.
///
/// Each predicate is a side-effect-free boolean query. The dispatcher reads
/// them at dispatch time and never caches the answers, so a client may
/// legitimately change its answers between commands.
#[cfg_attr(test, mockall::automock)]
pub trait Client {
    /// Whether the command was invoked from a command-line process.
    ///
    /// When this returns `false` the client is embedding the command layer
    /// programmatically and results are delivered through the completion
    /// callback.
    fn is_command_line(&self) -> bool;

    /// Whether the command-line invocation is one-shot and non-interactive,
    /// consuming machine-readable output.
    fn is_headless(&self) -> bool;

    /// Whether verbose human-readable diagnostics are enabled.
    fn is_debugging(&self) -> bool;
}
