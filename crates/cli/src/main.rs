mod commands;
mod config;
mod runner;
mod tap;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// DDS display and printer file inspector.
#[derive(Parser)]
#[command(name = "dspf", version, about = "DDS display and printer file inspector")]
struct Cli {
    /// Output format (text or json) [default: text]
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log parser activity to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a dspf.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source member and print the model as JSON
    Parse {
        /// Path to the DDS source member
        file: PathBuf,
    },

    /// List the record formats of a source member
    Formats {
        /// Path to the DDS source member
        file: PathBuf,
    },

    /// Show the visible fields of one record format
    Show {
        /// Path to the DDS source member
        file: PathBuf,
        /// Record format name
        format: String,
        /// Indicator to treat as on (repeatable)
        #[arg(long = "on", value_parser = clap::value_parser!(u8).range(1..=99))]
        on: Vec<u8>,
    },

    /// Name the record format that covers a source line
    Locate {
        /// Path to the DDS source member
        file: PathBuf,
        /// 1-based source line number
        #[arg(long)]
        line: usize,
    },

    /// Run the conformance test suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match config::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(msg) => {
            report_error(&msg, cli.output.unwrap_or(OutputFormat::Text), cli.quiet);
            process::exit(1);
        }
    };
    let output = cli.output.or(settings.output).unwrap_or(OutputFormat::Text);

    match cli.command {
        Commands::Parse { file } => {
            commands::parse::cmd_parse(&file, output, cli.quiet);
        }
        Commands::Formats { file } => {
            commands::formats::cmd_formats(&file, output, cli.quiet);
        }
        Commands::Show { file, format, on } => {
            let indicators = settings.indicators_with(&on);
            commands::show::cmd_show(&file, &format, &indicators, output, cli.quiet);
        }
        Commands::Locate { file, line } => {
            commands::locate::cmd_locate(&file, line, output, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            commands::test::cmd_test(&suite_dir, cli.quiet);
        }
    }
}

/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("dspf_core=debug,dspf_cli=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            let err_json = serde_json::json!({ "error": msg });
            eprintln!("{}", err_json);
        }
    }
}

/// Report a library error: its `{"error", "message"}` form for JSON
/// output, its message otherwise.
pub(crate) fn report_dspf_error(err: &dspf_core::DspfError, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", err),
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&err.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err.kind()));
            eprintln!("{}", err_json);
        }
    }
}

/// Parse `file` or report the failure and exit 1.
pub(crate) fn load_or_exit(
    file: &std::path::Path,
    output: OutputFormat,
    quiet: bool,
) -> dspf_core::SourceFile {
    match dspf_core::parse_file(file) {
        Ok(parsed) => parsed,
        Err(e) => {
            report_dspf_error(&e, output, quiet);
            process::exit(1);
        }
    }
}
