//! Recursive quadratic-wirelength placement.
//!
//! Places the elements of a design in the unit square so that connected
//! elements end up close together. The engine builds a weighted graph from
//! the design's nets, solves a least-squares problem along one axis,
//! splits the elements at the median and recurses on both halves with the
//! axes exchanged until regions reach grid resolution.
//!
//! # Pipeline
//!
//! 1. **Build** — nodes for elements (and boundary terminals when a terminal
//!    constraint is enabled), clique-expanded nets as edges
//! 2. **Solve** — normal equations of the jittered observation system
//! 3. **Split** — median bisection with placeholders for crossing edges
//! 4. **Report** — final `(x, y)` per element through a [`PositionSink`]
//!
//! # Usage
//!
//! ```ignore
//! use qwp_place::{place_netlist, PlacerConfig};
//!
//! let (placement, report) = place_netlist(&netlist, &PlacerConfig::default(), &sink)?;
//! for (name, p) in placement.iter() {
//!     println!("{name} {} {}", p.x, p.y);
//! }
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod graph;
pub mod ids;
pub mod placer;
pub mod plot;
pub mod rng;
pub mod sink;
pub mod solver;
pub mod source;
pub mod system;

pub use builder::{build_graph, BuiltGraph};
pub use error::{PlaceError, PlaceResult, SolveError};
pub use graph::{Graph, Node};
pub use ids::ElementSlot;
pub use placer::{Interval, PlaceStats, Region};
pub use plot::write_pyplot;
pub use qwp_config::{Axis, PlacerConfig, SolverKind};
pub use rng::Xorshift32;
pub use sink::{Placement, Point, PositionSink};
pub use solver::{solver_for, GaussianElimination, LinearSolver, PartialPivoting};
pub use source::{BoundaryWire, PlaceableElement, PlacementSource};

use placer::Placer;
use qwp_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use qwp_netlist::Netlist;
use tracing::info;

/// What a successful run produced besides the positions.
#[derive(Debug, Clone)]
pub struct PlaceReport {
    /// Run counters.
    pub stats: PlaceStats,
    /// Number of placed elements.
    pub elements: usize,
    /// Number of boundary terminal nodes.
    pub terminals: usize,
    /// The top-level graph with final coordinates.
    pub graph: Graph,
}

/// Places every element of `source` and reports each position to
/// `positions`.
///
/// Dropped nets are reported to `sink` as warnings. On success a summary
/// note is emitted; on failure an error diagnostic is emitted and the error
/// is returned. No position is reported unless the whole run succeeds.
pub fn place<S, P>(
    source: &S,
    config: &PlacerConfig,
    sink: &DiagnosticSink,
    positions: &mut P,
) -> PlaceResult<PlaceReport>
where
    S: PlacementSource + ?Sized,
    P: PositionSink<S::Key> + ?Sized,
{
    if config.seed == 0 {
        return fail(sink, PlaceError::ZeroSeed);
    }

    let mut rng = Xorshift32::new(config.seed);
    let built = build_graph(source, config, &mut rng, sink);
    let solver = solver_for(config.solver);
    info!(
        elements = built.keys.len(),
        terminals = built.terminals,
        edges = built.graph.edge_count(),
        solver = solver.name(),
        grid = config.grid_resolution(),
        "starting placement"
    );

    let mut placer = Placer::new(
        config.grid_resolution(),
        &mut rng,
        solver.as_ref(),
        &built.names,
    );
    let result = placer.run(built.graph);
    let mut stats = placer.stats;
    stats.dropped_nets = built.dropped_nets;

    let graph = match result {
        Ok(graph) => graph,
        Err(err) => return fail(sink, err),
    };

    for node in &graph.nodes {
        if let Some(slot) = node.element {
            let idx = slot.index();
            positions.record(built.keys[idx], &built.names[idx], node.point(graph.axis));
        }
    }

    sink.emit(
        Diagnostic::note(
            DiagnosticCode::RUN_SUMMARY,
            format!(
                "placed {} elements in {} regions",
                built.keys.len(),
                stats.leaves
            ),
        )
        .with_note(format!(
            "{} solves, depth {}, {} placeholders, {} dropped nets",
            stats.solves, stats.max_depth, stats.placeholders, stats.dropped_nets
        )),
    );
    info!(
        solves = stats.solves,
        leaves = stats.leaves,
        max_depth = stats.max_depth,
        "placement finished"
    );

    Ok(PlaceReport {
        stats,
        elements: built.keys.len(),
        terminals: built.terminals,
        graph,
    })
}

fn fail<T>(sink: &DiagnosticSink, err: PlaceError) -> PlaceResult<T> {
    let mut diag = Diagnostic::error(DiagnosticCode::PLACEMENT_FAILED, err.to_string());
    if let PlaceError::OutOfBounds {
        element: Some(name),
        ..
    } = &err
    {
        diag = diag.with_subject(name.clone());
    }
    if matches!(err, PlaceError::NonFinite { .. } | PlaceError::Solve(_)) {
        diag = diag.with_help("try `solver = \"pivoting\"` or a different seed");
    }
    sink.emit(diag);
    Err(err)
}

/// Places the selected elements of a netlist and collects the positions by
/// element name.
pub fn place_netlist(
    netlist: &Netlist,
    config: &PlacerConfig,
    sink: &DiagnosticSink,
) -> PlaceResult<(Placement, PlaceReport)> {
    let mut placement = Placement::new();
    let report = place(netlist, config, sink, &mut placement)?;
    Ok((placement, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwp_diagnostics::Severity;
    use qwp_netlist::PortDirection;

    fn chain(n: usize) -> Netlist {
        let mut nl = Netlist::new("chain");
        let mut prev = nl.add_wire("in", 1, Some(PortDirection::Input)).unwrap();
        for i in 0..n {
            let dir = (i + 1 == n).then_some(PortDirection::Output);
            let next = nl.add_wire(format!("n{i}"), 1, dir).unwrap();
            let e = nl.add_element(format!("buf{i}"), "$buf").unwrap();
            nl.connect(e, "A", nl.wire_bits(prev)).unwrap();
            nl.connect(e, "Y", nl.wire_bits(next)).unwrap();
            prev = next;
        }
        nl
    }

    #[test]
    fn every_element_gets_a_position() {
        let nl = chain(6);
        let sink = DiagnosticSink::new();
        let (placement, report) = place_netlist(&nl, &PlacerConfig::default(), &sink).unwrap();
        assert_eq!(placement.len(), 6);
        assert_eq!(report.elements, 6);
        assert_eq!(report.terminals, 0);
        for (_, p) in placement.iter() {
            assert!((-0.1..=1.1).contains(&p.x));
            assert!((-0.1..=1.1).contains(&p.y));
        }
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::RUN_SUMMARY);
    }

    #[test]
    fn sink_receives_keys_in_source_order() {
        let nl = chain(3);
        let sink = DiagnosticSink::new();
        let mut seen = Vec::new();
        let mut record = |key: qwp_netlist::ElementId, name: &str, _p: Point| {
            seen.push((key.index(), name.to_string()));
        };
        place(&nl, &PlacerConfig::default(), &sink, &mut record).unwrap();
        assert_eq!(
            seen,
            vec![(0, "buf0".into()), (1, "buf1".into()), (2, "buf2".into())]
        );
    }

    #[test]
    fn zero_seed_is_rejected() {
        let nl = chain(2);
        let sink = DiagnosticSink::new();
        let config = PlacerConfig {
            seed: 0,
            ..PlacerConfig::default()
        };
        let err = place_netlist(&nl, &config, &sink).unwrap_err();
        assert_eq!(err, PlaceError::ZeroSeed);
        assert!(sink.has_errors());
        assert_eq!(sink.diagnostics()[0].severity, Severity::Error);
    }

    #[test]
    fn empty_netlist_places_nothing() {
        let nl = Netlist::new("empty");
        let sink = DiagnosticSink::new();
        let (placement, report) = place_netlist(&nl, &PlacerConfig::default(), &sink).unwrap();
        assert!(placement.is_empty());
        assert_eq!(report.stats.solves, 1);
        assert_eq!(report.stats.leaves, 1);
    }

    #[test]
    fn first_axis_y_reports_x_and_y_correctly() {
        let nl = chain(4);
        let sink = DiagnosticSink::new();
        let config = PlacerConfig {
            first_axis: Axis::Y,
            left_to_right: true,
            ..PlacerConfig::default()
        };
        let (_, report) = place_netlist(&nl, &config, &sink).unwrap();
        assert_eq!(report.graph.axis, Axis::Y);
        // the input terminal is tied on the primary axis, now y
        let terminal = &report.graph.nodes[0];
        assert!(terminal.tied);
        assert_eq!(terminal.point(report.graph.axis).y, 0.0);
    }
}
