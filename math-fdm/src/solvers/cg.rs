//! Conjugate Gradient solver

use super::{SolveStats, finish};
use crate::error::FdmError;
use crate::grid::FdmLinearSystem;
use crate::iterative::{CgBuffers, CgConfig, pcg};
use crate::traits::{FdmLinearSystemSolver, FdmSolution, IdentityPreconditioner};

/// Unpreconditioned CG
///
/// The solution is reset to zero before every solve.
#[derive(Debug, Clone, Default)]
pub struct FdmCgSolver {
    config: CgConfig,
    buffers: CgBuffers,
    stats: SolveStats,
}

impl FdmCgSolver {
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

impl FdmLinearSystemSolver for FdmCgSolver {
    fn solve(&mut self, system: &mut FdmLinearSystem) -> Result<FdmSolution, FdmError> {
        self.config.validate()?;
        system.validate()?;

        system.x.set(0.0);
        let result = pcg(
            &system.a,
            &system.b,
            &mut system.x,
            &mut IdentityPreconditioner,
            &mut self.buffers,
            &self.config,
        );

        self.stats = SolveStats {
            iterations: result.iterations,
            residual: result.residual,
        };
        Ok(finish(
            "CG",
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
