//! Configuration types deserialized from `qwp.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of grid divisions per axis.
pub const DEFAULT_GRID_DIVISIONS: u32 = 16;

/// Default seed of the placement random generator.
pub const DEFAULT_SEED: u32 = 123_456_789;

/// Default upper bound on the number of nodes a net may touch before it is
/// left out of the clique expansion.
pub const DEFAULT_MAX_NET_DEGREE: usize = 100;

/// The top-level configuration parsed from `qwp.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QwpConfig {
    /// Settings of the placement engine.
    #[serde(default)]
    pub placer: PlacerConfig,
}

/// Settings of the recursive quadratic placer.
///
/// These are owned by the caller and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacerConfig {
    /// Tie input terminals to the left border and outputs to the right border.
    pub left_to_right: bool,
    /// Order input and output terminals alphabetically along the secondary axis.
    pub alphabetical_ordering: bool,
    /// Number of grid divisions per axis; recursion stops once a region is no
    /// wider than one division.
    pub grid_divisions: u32,
    /// Seed of the xorshift generator. Must be non-zero.
    pub seed: u32,
    /// Nets touching more nodes than this are not expanded into edges.
    pub max_net_degree: usize,
    /// The axis solved by the top-level call.
    pub first_axis: Axis,
    /// The linear solver used for the normal equations.
    pub solver: SolverKind,
}

impl PlacerConfig {
    /// Returns the grid resolution, i.e. the width of one grid division in
    /// the unit square.
    pub fn grid_resolution(&self) -> f64 {
        1.0 / f64::from(self.grid_divisions)
    }
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            left_to_right: false,
            alphabetical_ordering: false,
            grid_divisions: DEFAULT_GRID_DIVISIONS,
            seed: DEFAULT_SEED,
            max_net_degree: DEFAULT_MAX_NET_DEGREE,
            first_axis: Axis::X,
            solver: SolverKind::Gaussian,
        }
    }
}

/// One of the two placement axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The horizontal axis.
    #[default]
    X,
    /// The vertical axis.
    Y,
}

impl Axis {
    /// Returns the other axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Selects the algorithm used to solve the normal equations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Gaussian elimination without pivoting (reference behavior).
    #[default]
    Gaussian,
    /// Gaussian elimination with partial pivoting; rejects singular systems.
    Pivoting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PlacerConfig::default();
        assert!(!cfg.left_to_right);
        assert!(!cfg.alphabetical_ordering);
        assert_eq!(cfg.grid_divisions, 16);
        assert_eq!(cfg.seed, 123_456_789);
        assert_eq!(cfg.max_net_degree, 100);
        assert_eq!(cfg.first_axis, Axis::X);
        assert_eq!(cfg.solver, SolverKind::Gaussian);
    }

    #[test]
    fn grid_resolution_is_reciprocal() {
        let cfg = PlacerConfig {
            grid_divisions: 8,
            ..PlacerConfig::default()
        };
        assert_eq!(cfg.grid_resolution(), 0.125);
        assert_eq!(PlacerConfig::default().grid_resolution(), 1.0 / 16.0);
    }

    #[test]
    fn axis_other() {
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.other(), Axis::X);
        assert_eq!(Axis::X.to_string(), "x");
    }
}
