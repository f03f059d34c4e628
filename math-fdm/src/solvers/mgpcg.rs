//! MGPCG solver: CG preconditioned with one multigrid V-cycle

use super::{SolveStats, finish};
use crate::error::FdmError;
use crate::iterative::{CgBuffers, CgConfig, pcg};
use crate::multigrid::{FdmMgLinearSystem, MgParameters};
use crate::preconditioners::{MgPreconditioner, MgWorkspace};
use crate::traits::{FdmMgLinearSystemSolver, FdmSolution};

/// MGPCG solver configuration
///
/// Convergence is decided by `cg.tolerance` alone. The preconditioner runs a
/// fixed single V-cycle, so `mg.max_tolerance` is never read here;
/// [`MgpcgConfig::new`] keeps it equal to the CG tolerance.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MgpcgConfig {
    /// Outer CG iteration; its tolerance decides convergence
    pub cg: CgConfig,
    /// V-cycle used as preconditioner
    pub mg: MgParameters,
}

impl MgpcgConfig {
    pub fn new(max_iterations: usize, tolerance: f64, mg: MgParameters) -> Self {
        Self {
            cg: CgConfig::new(max_iterations, tolerance),
            mg: MgParameters {
                max_tolerance: tolerance,
                ..mg
            },
        }
    }

    pub fn validate(&self) -> Result<(), FdmError> {
        self.cg.validate()?;
        self.mg.validate()
    }
}

/// Multigrid-preconditioned CG
///
/// Solves the finest level of the hierarchy; coarser levels only feed the
/// preconditioner. The finest solution is reset to zero before every solve.
#[derive(Debug, Clone, Default)]
pub struct FdmMgpcgSolver {
    config: MgpcgConfig,
    buffers: CgBuffers,
    workspace: MgWorkspace,
    stats: SolveStats,
}

impl FdmMgpcgSolver {
    pub fn new(config: MgpcgConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &MgpcgConfig {
        &self.config
    }

    pub fn params(&self) -> &MgParameters {
        &self.config.mg
    }
}

impl FdmMgLinearSystemSolver for FdmMgpcgSolver {
    fn solve_mg(&mut self, system: &mut FdmMgLinearSystem) -> Result<FdmSolution, FdmError> {
        self.config.validate()?;
        system.validate()?;
        self.config.mg.check_level_count(system.number_of_levels())?;

        let FdmMgLinearSystem { a, x, b } = system;
        let x0 = &mut x.levels[0];
        x0.set(0.0);

        let mut precond = MgPreconditioner::new(a, &self.config.mg, &mut self.workspace);
        let result = pcg(
            &a.levels[0],
            &b.levels[0],
            x0,
            &mut precond,
            &mut self.buffers,
            &self.config.cg,
        );

        self.stats = SolveStats {
            iterations: result.iterations,
            residual: result.residual,
        };
        let cg = &self.config.cg;
        Ok(finish(
            "MGPCG",
            cg.success_policy,
            cg.tolerance,
            cg.max_iterations,
            self.stats,
            result.residual_history,
        ))
    }

    fn max_number_of_iterations(&self) -> usize {
        self.config.cg.max_iterations
    }

    fn last_number_of_iterations(&self) -> usize {
        self.stats.iterations
    }

    fn tolerance(&self) -> f64 {
        self.config.cg.tolerance
    }

    fn last_residual(&self) -> f64 {
        self.stats.residual
    }
}
