//! End-to-end delivery tests for the `emissary` binary.
//!
//! These exercise the real process boundary: the machine-readable channel
//! on stdout, the diagnostic channel on stderr, and the exit code owned by
//! the shell.

use assert_cmd::Command;
use predicates::prelude::*;

fn emissary() -> Command {
    Command::cargo_bin("emissary").expect("binary built")
}

#[test]
fn headless_ping_emits_envelope_and_exits_zero() {
    emissary()
        .args(["--headless", "ping"])
        .assert()
        .success()
        .stdout("{\"result\":\"pong\",\"success\":true}\n")
        .stderr("");
}

#[test]
fn headless_echo_normalizes_sequence() {
    emissary()
        .args(["--headless", "echo", "a", "b"])
        .assert()
        .success()
        .stdout("{\"result\":[\"a\",\"b\"],\"success\":true}\n");
}

#[test]
fn headless_describe_normalizes_structure() {
    emissary()
        .args(["--headless", "describe", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"))
        .stdout(predicate::str::contains("\"describe\""));
}

#[test]
fn headless_failure_writes_stderr_and_exits_one() {
    emissary()
        .args(["--headless", "fail", "boom"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("\"result\":\"boom\""))
        .stderr(predicate::str::contains("\"success\":false"))
        .stderr(predicate::str::contains("\"stack\":"));
}

#[test]
fn headless_unknown_operation_exits_one() {
    emissary()
        .args(["--headless", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown operation: bogus"));
}

#[test]
fn interactive_success_is_quiet() {
    emissary().arg("ping").assert().success().stdout("");
}

#[test]
fn interactive_failure_with_stack_renders_trace_sections() {
    emissary()
        .args(["fail", "boom"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Promise Trace -->"))
        .stderr(predicate::str::contains("boom"))
        .stderr(predicate::str::contains("Stack Trace -->"));
}

#[test]
fn interactive_failure_without_stack_exits_zero() {
    // Unknown operations carry no diagnostic stack; the interactive exit
    // status follows stack presence rather than the success flag.
    emissary()
        .arg("bogus")
        .assert()
        .success()
        .stderr(predicate::str::contains("Stack Trace -->").not());
}

#[test]
fn debugging_flag_overrides_headless_channel() {
    emissary()
        .args(["--headless", "--verbose", "fail", "boom"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Stack Trace -->"));
}
