//! Core traits for the solver family
//!
//! - [`Preconditioner`]: approximate inverse applied inside CG
//! - [`FdmLinearSystemSolver`]: solves a single-level stencil system in place
//! - [`FdmMgLinearSystemSolver`]: solves a multigrid hierarchy in place

use crate::error::FdmError;
use crate::grid::{FdmLinearSystem, FdmVector};
use crate::multigrid::FdmMgLinearSystem;

/// Trait for preconditioners used by the CG driver.
///
/// A preconditioner M approximates A^(-1), so that M*A is better conditioned
/// than A alone. Implementations may keep scratch buffers, hence `&mut self`.
pub trait Preconditioner {
    /// Apply the preconditioner: x = M * b
    fn solve(&mut self, b: &FdmVector, x: &mut FdmVector);
}

/// Identity preconditioner (plain CG)
#[derive(Clone, Debug, Default)]
pub struct IdentityPreconditioner;

impl Preconditioner for IdentityPreconditioner {
    fn solve(&mut self, b: &FdmVector, x: &mut FdmVector) {
        x.set_from(b);
    }
}

/// How a finished solve decides whether it succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuccessPolicy {
    /// Success iff the final residual norm is at most the tolerance
    #[default]
    ResidualBelowTolerance,
    /// Success if the residual is at most the tolerance or the solver stopped
    /// before spending its whole iteration budget (including on a stall)
    Permissive,
}

impl SuccessPolicy {
    pub fn is_success(
        &self,
        residual: f64,
        tolerance: f64,
        iterations: usize,
        max_iterations: usize,
    ) -> bool {
        match self {
            SuccessPolicy::ResidualBelowTolerance => residual <= tolerance,
            SuccessPolicy::Permissive => residual <= tolerance || iterations < max_iterations,
        }
    }
}

/// Outcome of a solve; the solution itself is written into the system
#[derive(Debug, Clone, PartialEq)]
pub struct FdmSolution {
    /// Number of iterations (sweeps, CG steps or V-cycles)
    pub iterations: usize,
    /// Final residual norm
    pub residual: f64,
    /// Whether the solve counts as successful under the configured policy
    pub converged: bool,
    /// Residual norm after each iteration, when the solver tracks it
    pub residual_history: Vec<f64>,
}

/// A solver for single-level stencil systems
pub trait FdmLinearSystemSolver {
    /// Solve `system` in place, overwriting `system.x`
    fn solve(&mut self, system: &mut FdmLinearSystem) -> Result<FdmSolution, FdmError>;

    /// Iteration budget
    fn max_number_of_iterations(&self) -> usize;

    /// Iterations used by the last solve
    fn last_number_of_iterations(&self) -> usize;

    /// Residual tolerance
    fn tolerance(&self) -> f64;

    /// Residual norm after the last solve (`f64::MAX` before any solve)
    fn last_residual(&self) -> f64;
}

/// A solver that needs the full multigrid hierarchy
pub trait FdmMgLinearSystemSolver {
    /// Solve the finest level of `system` in place
    fn solve_mg(&mut self, system: &mut FdmMgLinearSystem) -> Result<FdmSolution, FdmError>;

    fn max_number_of_iterations(&self) -> usize;

    fn last_number_of_iterations(&self) -> usize;

    fn tolerance(&self) -> f64;

    fn last_residual(&self) -> f64;
}
