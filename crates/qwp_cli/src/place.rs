//! `qwp place` — the placement pipeline.
//!
//! 1. Load `qwp.toml` (explicit `--config`, else the current directory, else
//!    defaults) and apply command-line overrides
//! 2. Load and validate the netlist document
//! 3. Place
//! 4. Render diagnostics, write positions and the optional plot script

use std::fs;
use std::path::{Path, PathBuf};

use qwp_config::{Axis, PlacerConfig, QwpConfig, SolverKind, CONFIG_FILE_NAME};
use qwp_diagnostics::{DiagnosticRenderer, DiagnosticSink, JsonRenderer, TerminalRenderer};
use qwp_place::{place_netlist, write_pyplot, Placement};
use tracing::debug;

use crate::{AxisArg, GlobalArgs, OutputFormat, PlaceArgs, ReportFormat, SolverArg};

/// Runs the `qwp place` command.
///
/// Returns exit code 0 on success and 1 if placement failed.
pub fn run(args: &PlaceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = resolve_config(global)?.placer;
    apply_overrides(&mut config, args);
    debug!(?config, "effective placer configuration");

    let netlist = qwp_netlist::load_netlist(Path::new(&args.netlist))?;
    if !global.quiet {
        eprintln!(
            "     Placing {} ({} elements, {} wires)",
            netlist.name,
            netlist.element_count(),
            netlist.wire_count()
        );
    }

    let sink = DiagnosticSink::new();
    let outcome = place_netlist(&netlist, &config, &sink);
    render_diagnostics(&sink, args.diagnostics, global);

    let (placement, report) = match outcome {
        Ok(done) => done,
        Err(_) => return Ok(1),
    };

    let rendered = render_positions(&placement, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }

    if let Some(path) = &args.plot {
        let mut script = String::new();
        write_pyplot(&report.graph, &mut script)?;
        fs::write(path, script)?;
    }

    if global.verbose {
        eprintln!(
            "   Stats: {} solves, {} leaves, depth {}, {} placeholders",
            report.stats.solves,
            report.stats.leaves,
            report.stats.max_depth,
            report.stats.placeholders
        );
    }
    if !global.quiet {
        eprintln!("    Finished {} elements placed", placement.len());
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Loads the configuration named by `--config`, or `qwp.toml` in the
/// current directory if present, or the defaults.
fn resolve_config(global: &GlobalArgs) -> Result<QwpConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &global.config {
        return Ok(qwp_config::load_config(Path::new(path))?);
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(qwp_config::load_config(&local)?);
    }
    Ok(QwpConfig::default())
}

/// Command-line flags take precedence over the file.
fn apply_overrides(config: &mut PlacerConfig, args: &PlaceArgs) {
    if args.ltr {
        config.left_to_right = true;
    }
    if args.alpha {
        config.alphabetical_ordering = true;
    }
    if let Some(grid) = args.grid {
        config.grid_divisions = grid;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(degree) = args.max_net_degree {
        config.max_net_degree = usize::try_from(degree).unwrap_or(usize::MAX);
    }
    if let Some(axis) = args.first_axis {
        config.first_axis = match axis {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
        };
    }
    if let Some(solver) = args.solver {
        config.solver = match solver {
            SolverArg::Gaussian => SolverKind::Gaussian,
            SolverArg::Pivoting => SolverKind::Pivoting,
        };
    }
}

fn render_diagnostics(sink: &DiagnosticSink, format: ReportFormat, global: &GlobalArgs) {
    let renderer: Box<dyn DiagnosticRenderer> = match format {
        ReportFormat::Text => Box::new(TerminalRenderer::new(global.color)),
        ReportFormat::Json => Box::new(JsonRenderer),
    };
    for diag in sink.diagnostics() {
        if global.quiet && !diag.severity.is_error() {
            continue;
        }
        match format {
            ReportFormat::Text => eprint!("{}", renderer.render(&diag)),
            ReportFormat::Json => eprintln!("{}", renderer.render(&diag)),
        }
    }
}

fn render_positions(
    placement: &Placement,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(placement)? + "\n"),
        OutputFormat::Text => Ok(placement.to_text()),
    }
}
