//! QWP CLI — command-line front end of the quadratic wirelength placer.
//!
//! Provides `qwp init` to write a default `qwp.toml` and `qwp place` to
//! place a netlist document and write the element positions.

#![warn(missing_docs)]

mod init;
mod place;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

/// QWP — recursive quadratic wirelength placement.
#[derive(Parser, Debug)]
#[command(name = "qwp", version, about = "Quadratic wirelength placer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `qwp.toml` file or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a `qwp.toml` with default settings.
    Init {
        /// Directory to write into. Defaults to the current directory.
        dir: Option<String>,
    },
    /// Place a netlist and write element positions.
    Place(PlaceArgs),
}

/// Arguments for the `qwp place` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Netlist JSON document.
    pub netlist: String,

    /// Tie input ports to the left border and output ports to the right.
    #[arg(long)]
    pub ltr: bool,

    /// Order ports alphabetically along the secondary axis.
    #[arg(long)]
    pub alpha: bool,

    /// Number of grid divisions per axis.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub grid: Option<u32>,

    /// Seed of the random generator.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub seed: Option<u32>,

    /// Nets touching more nodes than this are ignored.
    #[arg(long, value_parser = clap::value_parser!(u64).range(2..))]
    pub max_net_degree: Option<u64>,

    /// Axis solved first.
    #[arg(long, value_enum)]
    pub first_axis: Option<AxisArg>,

    /// Linear solver for the normal equations.
    #[arg(long, value_enum)]
    pub solver: Option<SolverArg>,

    /// Output format for positions.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write positions to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write a matplotlib script of the placed graph.
    #[arg(long)]
    pub plot: Option<String>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub diagnostics: ReportFormat,
}

/// Placement axis selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// Linear solver selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SolverArg {
    /// Gaussian elimination without pivoting.
    Gaussian,
    /// Gaussian elimination with partial pivoting.
    Pivoting,
}

/// Position output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"name": [x, y]}` object.
    Json,
    /// One `name x y` line per element.
    Text,
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
    /// One JSON object per line.
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
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    init_logging(cli.quiet, cli.verbose, color);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { dir } => init::run(dir, &global),
        Command::Place(ref args) => place::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Maps the verbosity flags to a maximum tracing level.
fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn init_logging(quiet: bool, verbose: bool, color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(quiet, verbose))
        .with_target(false)
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .try_init();
}
