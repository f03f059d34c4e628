//! Standalone multigrid solver

use super::{SolveStats, finish};
use crate::blas::{l2_norm, residual};
use crate::error::{FdmError, check_nonzero};
use crate::multigrid::{FdmMgLinearSystem, FdmMgVector, MgParameters, mg_v_cycle};
use crate::traits::{FdmMgLinearSystemSolver, FdmSolution, SuccessPolicy};

/// Standalone multigrid solver configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MgSolverConfig {
    /// Maximum number of V-cycles
    pub max_cycles: usize,
    /// Cycle parameters; `mg.max_tolerance` is the stopping tolerance
    pub mg: MgParameters,
    pub success_policy: SuccessPolicy,
}

impl Default for MgSolverConfig {
    fn default() -> Self {
        Self {
            max_cycles: 100,
            mg: MgParameters::default(),
            success_policy: SuccessPolicy::default(),
        }
    }
}

impl MgSolverConfig {
    pub fn validate(&self) -> Result<(), FdmError> {
        check_nonzero("max_cycles", self.max_cycles)?;
        self.mg.validate()
    }
}

/// Repeated V-cycles until the finest residual drops below `mg.max_tolerance`
///
/// `system.x.levels[0]` is the initial guess. Coarser levels of `x` and `b`
/// are overwritten as scratch space.
#[derive(Debug, Clone, Default)]
pub struct FdmMgSolver {
    config: MgSolverConfig,
    buffer: FdmMgVector,
    stats: SolveStats,
}

impl FdmMgSolver {
    pub fn new(config: MgSolverConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &MgSolverConfig {
        &self.config
    }

    pub fn params(&self) -> &MgParameters {
        &self.config.mg
    }
}

impl FdmMgLinearSystemSolver for FdmMgSolver {
    fn solve_mg(&mut self, system: &mut FdmMgLinearSystem) -> Result<FdmSolution, FdmError> {
        self.config.validate()?;
        system.validate()?;
        self.config.mg.check_level_count(system.number_of_levels())?;

        self.buffer.resize_to(&system.a.resolutions());
        let config = &self.config;
        let tolerance = config.mg.max_tolerance;

        residual(
            &system.a.levels[0],
            &system.x.levels[0],
            &system.b.levels[0],
            &mut self.buffer.levels[0],
        );
        let mut residual_norm = l2_norm(&self.buffer.levels[0]);
        let mut history = Vec::new();
        let mut cycles = 0;

        while residual_norm > tolerance && cycles < config.max_cycles {
            let result = mg_v_cycle(
                &system.a,
                &config.mg,
                &mut system.x,
                &mut system.b,
                &mut self.buffer,
            );
            cycles += 1;
            residual_norm = result.last_residual_norm;
            history.push(residual_norm);
        }

        self.stats = SolveStats {
            iterations: cycles,
            residual: residual_norm,
        };
        Ok(finish(
            "MG",
            config.success_policy,
            tolerance,
            config.max_cycles,
            self.stats,
            history,
        ))
    }

    fn max_number_of_iterations(&self) -> usize {
        self.config.max_cycles
    }

    fn last_number_of_iterations(&self) -> usize {
        self.stats.iterations
    }

    fn tolerance(&self) -> f64 {
        self.config.mg.max_tolerance
    }

    fn last_residual(&self) -> f64 {
        self.stats.residual
    }
}
