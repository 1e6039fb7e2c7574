//! fsmc CLI, the command-line front end of the FSM compiler.
//!
//! Reads a transition-table file, compiles it, and writes the SystemVerilog
//! module (`-v`) and/or the Graphviz state diagram (`-g`) into the output
//! folder. Without either flag the table is only checked.

#![warn(missing_docs)]

mod build;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

/// fsmc, a finite-state-machine compiler for hardware designs.
#[derive(Parser, Debug)]
#[command(name = "fsmc", version, about = "FSM to SystemVerilog compiler")]
pub struct Cli {
    /// Path to the transition-table file.
    pub table: PathBuf,

    /// Folder the generated files are written to.
    #[arg(short, long, default_value = ".")]
    pub out_folder: PathBuf,

    /// Generate the state diagram (`<name>.gv`).
    #[arg(short, long)]
    pub graph: bool,

    /// Generate the SystemVerilog module (`<name>.sv`).
    #[arg(short, long)]
    pub verilog: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(long)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
}

impl GlobalArgs {
    /// Resolves the global settings of `cli`.
    pub fn from_cli(cli: &Cli) -> Self {
        let color = match cli.color {
            ColorChoice::Auto => atty_is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        Self {
            quiet: cli.quiet,
            verbose: cli.verbose,
            color,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalArgs::from_cli(&cli);
    init_tracing(global.verbose);

    match build::run(&cli, &global) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Rough terminal detection from the `TERM` variable.
fn atty_is_terminal() -> bool {
    std::env::var("TERM").is_ok()
}
