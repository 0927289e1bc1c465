//! Argument surface for the command shell.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::telemetry::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "emissary", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Emit one machine-readable JSON line and exit.
    #[arg(long)]
    pub(crate) headless: bool,
    /// Enable verbose human-readable diagnostics.
    #[arg(long)]
    pub(crate) verbose: bool,
    /// Tracing filter expression overriding the default.
    #[arg(long)]
    pub(crate) log_filter: Option<String>,
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
    /// Project root the command runs against.
    #[arg(long, value_name = "PATH")]
    pub(crate) project: Option<Utf8PathBuf>,
    /// The operation to execute (for example `ping`).
    #[arg(value_name = "OPERATION")]
    pub(crate) operation: String,
    /// Additional arguments forwarded to the operation.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) arguments: Vec<String>,
}
