//! Diagnostic stack rendering for the interactive path.
//!
//! A failure stack is split into a summary line and a trace body and
//! re-emitted as two labelled sections on the error sink.

use std::io::{self, Write};

/// Platform line separator used to split diagnostic stacks.
pub(crate) const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Marker delimiting chained error messages within the summary line.
const ERROR_MARKER: &str = "Error: ";

const SUMMARY_HEADER: &str = "Promise Trace -->";
const BODY_HEADER: &str = "Stack Trace -->";

/// Writes the labelled stack sections to the error sink.
///
/// The first stack line is the summary; it is re-split on the literal
/// `"Error: "` marker and each segment is emitted on its own line under the
/// summary header. The remaining lines form the trace body, emitted as one
/// block under the body header. Each header is preceded by a blank line.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
pub(crate) fn write_stack_sections<E: Write>(stderr: &mut E, stack: &str) -> io::Result<()> {
    let mut lines = stack.split(LINE_SEPARATOR);
    let summary = lines.next().unwrap_or("");

    writeln!(stderr)?;
    writeln!(stderr, "{SUMMARY_HEADER}")?;
    for segment in summary.split(ERROR_MARKER) {
        writeln!(stderr, "{segment}")?;
    }

    writeln!(stderr)?;
    writeln!(stderr, "{BODY_HEADER}")?;
    let body: Vec<&str> = lines.collect();
    writeln!(stderr, "{}", body.join(LINE_SEPARATOR))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(stack: &str) -> String {
        let mut sink = Vec::new();
        write_stack_sections(&mut sink, stack).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn renders_summary_and_body_sections() {
        let output = render("Error: bad input\n  at f()\n  at g()");
        assert_eq!(
            output,
            "\nPromise Trace -->\n\nbad input\n\nStack Trace -->\n  at f()\n  at g()\n"
        );
    }

    #[test]
    fn splits_chained_error_messages() {
        let output = render("Error: outer Error: inner\n  at f()");
        let summary_section = output
            .split("Stack Trace -->")
            .next()
            .unwrap_or("");
        assert!(summary_section.contains("outer \n"));
        assert!(summary_section.contains("inner\n"));
    }

    #[test]
    fn handles_stack_without_body() {
        let output = render("Error: lonely");
        assert!(output.contains("Promise Trace -->"));
        assert!(output.contains("lonely\n"));
        assert!(output.ends_with("Stack Trace -->\n\n"));
    }
}
