//! Relaxation sweeps for stencil systems
//!
//! - [`jacobi_relax`]: out-of-place Jacobi, fully parallel
//! - [`gauss_seidel_relax`]: in-place Gauss-Seidel / SOR in natural order, sequential
//! - [`gauss_seidel_relax_red_black`]: Gauss-Seidel / SOR in red-black order, parallel per colour
//!
//! None of the sweeps checks convergence; callers own the iteration budget.

mod gauss_seidel;
mod jacobi;

pub use gauss_seidel::{gauss_seidel_relax, gauss_seidel_relax_red_black, relax};
pub use jacobi::jacobi_relax;

/// Diagonals with a smaller magnitude are treated as zero and the cell is left as is
pub(crate) const DIAGONAL_EPSILON: f64 = 1e-30;
