//! ICCG solver: CG preconditioned with IC(0)

use super::{SolveStats, finish};
use crate::error::FdmError;
use crate::grid::FdmLinearSystem;
use crate::iterative::{CgBuffers, CgConfig, pcg};
use crate::preconditioners::IncompleteCholeskyPreconditioner;
use crate::traits::{FdmLinearSystemSolver, FdmSolution};

/// Incomplete-Cholesky preconditioned CG
///
/// The factorization is rebuilt from `system.a` on every solve and its
/// buffers are reused while the resolution stays the same. The solution is
/// reset to zero before every solve.
#[derive(Debug, Clone, Default)]
pub struct FdmIccgSolver {
    config: CgConfig,
    buffers: CgBuffers,
    precond: IncompleteCholeskyPreconditioner,
    stats: SolveStats,
}

impl FdmIccgSolver {
    pub fn new(config: CgConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &CgConfig {
        &self.config
    }
}

impl FdmLinearSystemSolver for FdmIccgSolver {
    fn solve(&mut self, system: &mut FdmLinearSystem) -> Result<FdmSolution, FdmError> {
        self.config.validate()?;
        system.validate()?;

        system.x.set(0.0);
        self.precond.build(&system.a);
        let result = pcg(
            &system.a,
            &system.b,
            &mut system.x,
            &mut self.precond,
            &mut self.buffers,
            &self.config,
        );

        self.stats = SolveStats {
            iterations: result.iterations,
            residual: result.residual,
        };
        Ok(finish(
            "ICCG",
            self.config.success_policy,
            self.config.tolerance,
            self.config.max_iterations,
            self.stats,
            result.residual_history,
        ))
    }

    fn max_number_of_iterations(&self) -> usize {
        self.config.max_iterations
    }

    fn last_number_of_iterations(&self) -> usize {
        self.stats.iterations
    }

    fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    fn last_residual(&self) -> f64 {
        self.stats.residual
    }
}
