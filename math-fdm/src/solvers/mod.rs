//! Solver family
//!
//! Single-level solvers implement [`FdmLinearSystemSolver`]:
//!
//! - **FdmJacobiSolver**: repeated Jacobi sweeps (parallel)
//! - **FdmGaussSeidelSolver**: repeated Gauss-Seidel / SOR sweeps, natural or red-black order
//! - **FdmCgSolver**: Conjugate Gradient
//! - **FdmIccgSolver**: CG with the IC(0) preconditioner
//!
//! Multigrid solvers need the full hierarchy and implement [`FdmMgLinearSystemSolver`]:
//!
//! - **FdmMgSolver**: repeated V-cycles
//! - **FdmMgpcgSolver**: CG with one V-cycle as preconditioner
//!
//! [`FdmLinearSystemSolver`]: crate::traits::FdmLinearSystemSolver
//! [`FdmMgLinearSystemSolver`]: crate::traits::FdmMgLinearSystemSolver

mod cg;
mod gauss_seidel;
mod iccg;
mod jacobi;
mod mg;
mod mgpcg;

pub use cg::FdmCgSolver;
pub use gauss_seidel::{FdmGaussSeidelSolver, GaussSeidelConfig};
pub use iccg::FdmIccgSolver;
pub use jacobi::{FdmJacobiSolver, JacobiConfig};
pub use mg::{FdmMgSolver, MgSolverConfig};
pub use mgpcg::{FdmMgpcgSolver, MgpcgConfig};

use crate::traits::{FdmSolution, SuccessPolicy};

/// Bookkeeping shared by every solver: diagnostics of the last solve
#[derive(Debug, Clone, Copy, PartialEq)]
struct SolveStats {
    iterations: usize,
    residual: f64,
}

impl Default for SolveStats {
    fn default() -> Self {
        Self {
            iterations: 0,
            residual: f64::MAX,
        }
    }
}

/// Log the outcome of a solve and package it
fn finish(
    name: &str,
    policy: SuccessPolicy,
    tolerance: f64,
    max_iterations: usize,
    stats: SolveStats,
    residual_history: Vec<f64>,
) -> FdmSolution {
    let converged = policy.is_success(stats.residual, tolerance, stats.iterations, max_iterations);
    log::info!(
        "Residual after solving {}: {:.6e} Number of {} iterations: {}",
        name,
        stats.residual,
        name,
        stats.iterations
    );
    if !converged {
        log::warn!(
            "{} did not reach tolerance {:.1e} within {} iterations",
            name,
            tolerance,
            max_iterations
        );
    }
    FdmSolution {
        iterations: stats.iterations,
        residual: stats.residual,
        converged,
        residual_history,
    }
}
