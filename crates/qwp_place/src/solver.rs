//! Dense linear solvers for the normal equations.
//!
//! The placer only depends on the [`LinearSolver`] contract: take a square
//! matrix and a right-hand side, return the solution. Two eliminations are
//! provided. [`GaussianElimination`] does no pivoting and never fails; a
//! zero pivot shows up as non-finite values in the result.
//! [`PartialPivoting`] swaps rows for stability and reports singular systems.

use crate::error::SolveError;
use nalgebra::{DMatrix, DVector};
use qwp_config::SolverKind;

/// Solves `matrix * x = rhs` for a square `matrix`.
pub trait LinearSolver {
    /// Returns `x`. The inputs are consumed and may be used as scratch space.
    fn solve(&self, matrix: DMatrix<f64>, rhs: DVector<f64>) -> Result<DVector<f64>, SolveError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Gaussian elimination without pivoting.
///
/// Each pivot row is normalized, the entries below the pivot are
/// eliminated, and the solution is recovered by back substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianElimination;

/// Gaussian elimination with partial (row) pivoting.
#[derive(Debug, Clone, Copy)]
pub struct PartialPivoting {
    /// Pivots whose magnitude does not exceed this value are treated as
    /// zero. Free nodes are anchored with squared weights around `1e-12`,
    /// so the default sits well below that.
    pub min_pivot: f64,
}

impl Default for PartialPivoting {
    fn default() -> Self {
        Self { min_pivot: 1e-18 }
    }
}

/// Returns the solver selected in the configuration.
pub fn solver_for(kind: SolverKind) -> Box<dyn LinearSolver> {
    match kind {
        SolverKind::Gaussian => Box::new(GaussianElimination),
        SolverKind::Pivoting => Box::new(PartialPivoting::default()),
    }
}

fn check_dimensions(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Result<usize, SolveError> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rhs.len() != rows {
        return Err(SolveError::DimensionMismatch {
            rows,
            cols,
            rhs: rhs.len(),
        });
    }
    Ok(rows)
}

/// Solves an upper triangular system with unit diagonal in place.
fn back_substitute(m: &DMatrix<f64>, x: &mut DVector<f64>) {
    let n = x.len();
    for i in (0..n).rev() {
        for j in i + 1..n {
            x[i] -= m[(i, j)] * x[j];
        }
    }
}

impl LinearSolver for GaussianElimination {
    fn solve(
        &self,
        mut m: DMatrix<f64>,
        mut x: DVector<f64>,
    ) -> Result<DVector<f64>, SolveError> {
        let n = check_dimensions(&m, &x)?;

        for i in 0..n {
            let pivot = m[(i, i)];
            for j in i + 1..n {
                m[(i, j)] /= pivot;
            }
            x[i] /= pivot;
            m[(i, i)] = 1.0;

            for row in i + 1..n {
                let d = m[(row, i)];
                for k in i + 1..n {
                    m[(row, k)] -= d * m[(i, k)];
                }
                x[row] -= d * x[i];
                m[(row, i)] = 0.0;
            }
        }

        back_substitute(&m, &mut x);
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}

impl LinearSolver for PartialPivoting {
    fn solve(
        &self,
        mut m: DMatrix<f64>,
        mut x: DVector<f64>,
    ) -> Result<DVector<f64>, SolveError> {
        let n = check_dimensions(&m, &x)?;

        for i in 0..n {
            let (offset, best) = m
                .view((i, i), (n - i, 1))
                .iter()
                .map(|v| v.abs())
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |acc, (k, v)| if v > acc.1 { (k, v) } else { acc });
            if !(best > self.min_pivot) {
                return Err(SolveError::Singular { column: i });
            }
            if offset != 0 {
                m.swap_rows(i, i + offset);
                x.swap_rows(i, i + offset);
            }

            let pivot = m[(i, i)];
            for j in i + 1..n {
                m[(i, j)] /= pivot;
            }
            x[i] /= pivot;
            m[(i, i)] = 1.0;

            for row in i + 1..n {
                let d = m[(row, i)];
                if d == 0.0 {
                    continue;
                }
                for k in i + 1..n {
                    m[(row, k)] -= d * m[(i, k)];
                }
                x[row] -= d * x[i];
                m[(row, i)] = 0.0;
            }
        }

        back_substitute(&m, &mut x);
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "pivoting"
    }
}
