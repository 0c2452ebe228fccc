//! Placement error types.

use qwp_config::Axis;

/// Failures that abort a placement run.
///
/// None of these are recoverable: they mean the graph, a projection step or
/// the numerical solve produced a state the algorithm does not allow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceError {
    /// A solved coordinate left its region's tolerance band.
    #[error(
        "node {node} has {axis} = {value} outside the region [{low}, {high}] (tolerance included)"
    )]
    OutOfBounds {
        /// Index of the node in the graph of the failing call.
        node: usize,
        /// Name of the element, `None` for placeholders and terminals.
        element: Option<String>,
        /// The axis that was checked.
        axis: Axis,
        /// The offending coordinate.
        value: f64,
        /// Lower limit including tolerance.
        low: f64,
        /// Upper limit including tolerance.
        high: f64,
    },

    /// The solver returned NaN or infinity for a free node.
    #[error("solve on axis {axis} produced a non-finite value for node {node}")]
    NonFinite {
        /// Index of the node in the graph of the failing call.
        node: usize,
        /// The axis being solved.
        axis: Axis,
    },

    /// The generator was seeded with zero, which xorshift never leaves.
    #[error("placement seed must be non-zero")]
    ZeroSeed,

    /// The linear solver rejected the system.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Errors reported by a [`LinearSolver`](crate::LinearSolver).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// Matrix and right-hand side do not describe a square system.
    #[error("cannot solve a {rows}x{cols} system with a right-hand side of length {rhs}")]
    DimensionMismatch {
        /// Matrix rows.
        rows: usize,
        /// Matrix columns.
        cols: usize,
        /// Length of the right-hand side.
        rhs: usize,
    },

    /// No usable pivot was found for a column.
    #[error("matrix is singular at column {column}")]
    Singular {
        /// The column without a usable pivot.
        column: usize,
    },
}

/// Result alias used throughout the placer.
pub type PlaceResult<T> = Result<T, PlaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_bounds() {
        let err = PlaceError::OutOfBounds {
            node: 3,
            element: Some("u1".into()),
            axis: Axis::Y,
            value: 1.5,
            low: -0.1,
            high: 1.1,
        };
        assert_eq!(
            err.to_string(),
            "node 3 has y = 1.5 outside the region [-0.1, 1.1] (tolerance included)"
        );
    }

    #[test]
    fn solve_error_is_transparent() {
        let err: PlaceError = SolveError::Singular { column: 2 }.into();
        assert_eq!(err.to_string(), "matrix is singular at column 2");
    }
}
