//! Least-squares system for one axis of one frame.
//!
//! Every edge contributes a row asking its endpoints to coincide, and every
//! node contributes a row anchoring it at its current coordinate: strongly
//! for tied nodes, negligibly for free ones. The normal equations of that
//! overdetermined system are handed to a [`LinearSolver`].

use crate::error::{PlaceError, PlaceResult};
use crate::graph::Graph;
use crate::rng::Xorshift32;
use crate::solver::LinearSolver;
use nalgebra::{DMatrix, DVector};
use tracing::{enabled, trace, Level};

/// Anchor weight of a tied node.
pub const TIED_WEIGHT: f64 = 1e3;

/// Anchor weight of a free node.
pub const FREE_WEIGHT: f64 = 1e-6;

/// Relative magnitude of the random perturbation applied to every row.
pub const JITTER_SCALE: f64 = 1e-3;

/// Builds the `(edges + nodes) x nodes` observation matrix and its
/// right-hand side, drawing one jitter value per row in row order.
pub fn observation_system(graph: &Graph, rng: &mut Xorshift32) -> (DMatrix<f64>, DVector<f64>) {
    let n = graph.node_count();
    let m = graph.edge_count() + n;
    let mut a = DMatrix::<f64>::zeros(m, n);
    let mut y = DVector::<f64>::zeros(m);

    let mut row = 0;
    for (i, j, weight) in graph.edges() {
        let w = weight * (1.0 + rng.next_unit() * JITTER_SCALE);
        a[(row, i)] = w;
        a[(row, j)] = -w;
        row += 1;
    }

    for (col, node) in graph.nodes.iter().enumerate() {
        let base = if node.tied { TIED_WEIGHT } else { FREE_WEIGHT };
        let w = base * (1.0 + rng.next_unit() * JITTER_SCALE);
        a[(row, col)] = w;
        y[row] = node.pos * w;
        row += 1;
    }

    (a, y)
}

/// Solves the graph's current axis and writes the result into the `pos` of
/// every free node. Tied nodes keep their coordinate bit for bit.
pub fn solve_axis(
    graph: &mut Graph,
    rng: &mut Xorshift32,
    solver: &dyn LinearSolver,
) -> PlaceResult<()> {
    let (a, y) = observation_system(graph, rng);
    if enabled!(Level::TRACE) {
        trace!(axis = %graph.axis, "observation matrix [A | y]:\n{}", format_augmented(&a, &y));
    }

    let normal = a.tr_mul(&a);
    let rhs = a.tr_mul(&y);
    if enabled!(Level::TRACE) {
        trace!(axis = %graph.axis, solver = solver.name(), "normal equations [AtA | Aty]:\n{}", format_augmented(&normal, &rhs));
    }

    let solution = solver.solve(normal, rhs)?;

    for (idx, node) in graph.nodes.iter_mut().enumerate() {
        if node.tied {
            continue;
        }
        let value = solution[idx];
        if !value.is_finite() {
            return Err(PlaceError::NonFinite {
                node: idx,
                axis: graph.axis,
            });
        }
        node.pos = value;
    }
    Ok(())
}

fn format_augmented(m: &DMatrix<f64>, v: &DVector<f64>) -> String {
    let mut out = String::new();
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            out.push_str(&format!(" {:10.2e}", m[(r, c)]));
        }
        out.push_str(&format!(" |{:9.2e}\n", v[r]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::solver::{GaussianElimination, PartialPivoting};
    use qwp_config::Axis;

    fn node(pos: f64, tied: bool) -> Node {
        Node {
            element: None,
            tied,
            alt_tied: false,
            pos,
            alt_pos: 0.5,
        }
    }

    #[test]
    fn observation_layout() {
        let mut g = Graph::new(Axis::X);
        g.add_node(node(0.0, true));
        g.add_node(node(0.3, false));
        g.add_edge_weight(0, 1, 0.5);
        let (a, y) = observation_system(&g, &mut Xorshift32::new(3));
        assert_eq!(a.shape(), (3, 2));
        assert!(a[(0, 0)] >= 0.5 && a[(0, 0)] < 0.5 * (1.0 + JITTER_SCALE));
        assert_eq!(a[(0, 1)], -a[(0, 0)]);
        assert_eq!(y[0], 0.0);
        assert!(a[(1, 0)] >= TIED_WEIGHT);
        assert_eq!(a[(1, 1)], 0.0);
        assert!(a[(2, 1)] >= FREE_WEIGHT && a[(2, 1)] < 2.0 * FREE_WEIGHT);
        assert_eq!(y[2], 0.3 * a[(2, 1)]);
    }

    #[test]
    fn consumes_one_draw_per_row() {
        let mut g = Graph::new(Axis::X);
        for _ in 0..3 {
            g.add_node(node(0.5, false));
        }
        g.add_edge_weight(0, 1, 1.0);
        g.add_edge_weight(1, 2, 1.0);
        let mut rng = Xorshift32::new(11);
        observation_system(&g, &mut rng);
        let mut check = Xorshift32::new(11);
        for _ in 0..5 {
            check.next_u32();
        }
        assert_eq!(rng.state(), check.state());
    }

    #[test]
    fn free_node_between_two_tied_nodes() {
        let mut g = Graph::new(Axis::X);
        g.add_node(node(0.0, true));
        g.add_node(node(0.9, false));
        g.add_node(node(1.0, true));
        g.add_edge_weight(0, 1, 1.0);
        g.add_edge_weight(1, 2, 1.0);
        solve_axis(&mut g, &mut Xorshift32::new(1), &GaussianElimination).unwrap();
        assert_eq!(g.nodes[0].pos, 0.0);
        assert_eq!(g.nodes[2].pos, 1.0);
        assert!((g.nodes[1].pos - 0.5).abs() < 1e-3, "{}", g.nodes[1].pos);
    }

    #[test]
    fn connected_free_nodes_converge() {
        let mut g = Graph::new(Axis::Y);
        g.add_node(node(0.1, false));
        g.add_node(node(0.7, false));
        g.add_edge_weight(0, 1, 0.5);
        solve_axis(&mut g, &mut Xorshift32::new(1), &PartialPivoting::default()).unwrap();
        assert!((g.nodes[0].pos - g.nodes[1].pos).abs() < 1e-3);
        assert!((g.nodes[0].pos - 0.4).abs() < 1e-3);
    }

    #[test]
    fn isolated_free_node_keeps_its_coordinate() {
        let mut g = Graph::new(Axis::X);
        g.add_node(node(0.25, false));
        solve_axis(&mut g, &mut Xorshift32::new(1), &GaussianElimination).unwrap();
        assert!((g.nodes[0].pos - 0.25).abs() < 1e-12);
    }
}
