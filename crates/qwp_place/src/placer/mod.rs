//! Recursive bisection driven by quadratic solves.
//!
//! Each frame solves its primary axis, checks that every node stayed inside
//! its region, and either stops (the region reached grid resolution or has
//! fewer than two elements) or splits the elements at the median into two
//! child frames with the axes exchanged. Children work on their own copies;
//! after both return, element coordinates are copied back up.

mod region;
mod split;

pub use region::{Interval, Region, BOUNDS_TOLERANCE};

use crate::error::{PlaceError, PlaceResult};
use crate::graph::Graph;
use crate::rng::Xorshift32;
use crate::solver::LinearSolver;
use crate::system::solve_axis;
use qwp_config::Axis;
use serde::Serialize;
use tracing::{debug, enabled, trace, Level};

/// Counters collected during one placement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaceStats {
    /// Linear solves performed, one per frame.
    pub solves: usize,
    /// Frames that stopped without splitting.
    pub leaves: usize,
    /// Deepest frame reached; the top-level frame has depth 0.
    pub max_depth: usize,
    /// Placeholders synthesized for edges crossing a split.
    pub placeholders: usize,
    /// Nets left out of the graph for touching too many nodes.
    pub dropped_nets: usize,
}

/// Drives the recursion for one run.
pub(crate) struct Placer<'a> {
    grid: f64,
    rng: &'a mut Xorshift32,
    solver: &'a dyn LinearSolver,
    names: &'a [String],
    pub(crate) stats: PlaceStats,
}

impl<'a> Placer<'a> {
    pub(crate) fn new(
        grid: f64,
        rng: &'a mut Xorshift32,
        solver: &'a dyn LinearSolver,
        names: &'a [String],
    ) -> Self {
        Self {
            grid,
            rng,
            solver,
            names,
            stats: PlaceStats::default(),
        }
    }

    /// Places the whole unit square and returns the graph with final
    /// coordinates in its element nodes.
    pub(crate) fn run(&mut self, mut graph: Graph) -> PlaceResult<Graph> {
        self.place_region(&mut graph, Region::UNIT, 0)?;
        Ok(graph)
    }

    fn place_region(&mut self, graph: &mut Graph, region: Region, depth: usize) -> PlaceResult<()> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let (x, y) = match graph.axis {
            Axis::X => (region.primary, region.secondary),
            Axis::Y => (region.secondary, region.primary),
        };
        debug!(
            depth,
            axis = %graph.axis,
            %x,
            %y,
            cells = graph.element_count(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "placing region"
        );

        solve_axis(graph, self.rng, self.solver)?;
        self.stats.solves += 1;
        self.check_bounds(graph, &region)?;

        if region.is_leaf(self.grid) {
            self.leaf(graph, depth);
            return Ok(());
        }

        let Some((mut left, mut right)) = split::split_at_median(graph, region.primary.center)
        else {
            self.leaf(graph, depth);
            return Ok(());
        };
        self.stats.placeholders += left.placeholders + right.placeholders;

        let (left_region, right_region) = region.split();
        self.place_region(&mut left.graph, left_region, depth + 1)?;
        self.place_region(&mut right.graph, right_region, depth + 1)?;

        left.reintegrate(graph);
        right.reintegrate(graph);
        Ok(())
    }

    fn check_bounds(&self, graph: &Graph, region: &Region) -> PlaceResult<()> {
        for (idx, node) in graph.nodes.iter().enumerate() {
            let checks = [
                (graph.axis, node.pos, &region.primary),
                (graph.axis.other(), node.alt_pos, &region.secondary),
            ];
            for (axis, value, interval) in checks {
                if !interval.admits(value) {
                    let (low, high) = interval.tolerance_band();
                    return Err(PlaceError::OutOfBounds {
                        node: idx,
                        element: node
                            .element
                            .and_then(|slot| self.names.get(slot.index()).cloned()),
                        axis,
                        value,
                        low,
                        high,
                    });
                }
            }
        }
        Ok(())
    }

    fn leaf(&mut self, graph: &Graph, depth: usize) {
        self.stats.leaves += 1;
        if !enabled!(Level::TRACE) {
            return;
        }
        for node in &graph.nodes {
            let Some(slot) = node.element else { continue };
            let p = node.point(graph.axis);
            trace!(
                depth,
                element = self.names.get(slot.index()).map(String::as_str).unwrap_or("?"),
                x = p.x,
                y = p.y,
                tied = node.tied,
                alt_tied = node.alt_tied,
                "leaf element"
            );
        }
    }
}
