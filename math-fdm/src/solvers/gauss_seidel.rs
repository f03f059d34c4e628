//! Gauss-Seidel / SOR solver

use super::{SolveStats, finish};
use crate::blas::{l2_norm, residual};
use crate::error::{FdmError, check_nonzero, check_sor_factor, check_tolerance};
use crate::grid::{FdmLinearSystem, FdmVector};
use crate::smoothers::relax;
use crate::traits::{FdmLinearSystemSolver, FdmSolution, SuccessPolicy};

/// Gauss-Seidel / SOR solver configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussSeidelConfig {
    pub max_iterations: usize,
    /// Residual is evaluated every N sweeps
    pub residual_check_interval: usize,
    /// Absolute tolerance on the residual 2-norm
    pub tolerance: f64,
    /// Relaxation factor: 1.0 is Gauss-Seidel, above 1 over-relaxes
    pub sor_factor: f64,
    /// Red-black ordering makes each sweep parallel
    pub use_red_black_ordering: bool,
    pub success_policy: SuccessPolicy,
}

impl Default for GaussSeidelConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            residual_check_interval: 10,
            tolerance: 1e-6,
            sor_factor: 1.0,
            use_red_black_ordering: false,
            success_policy: SuccessPolicy::default(),
        }
    }
}

impl GaussSeidelConfig {
    pub fn new(max_iterations: usize, residual_check_interval: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            residual_check_interval,
            tolerance,
            ..Default::default()
        }
    }

    /// Same budget with over-relaxation
    pub fn with_sor(mut self, sor_factor: f64) -> Self {
        self.sor_factor = sor_factor;
        self
    }

    /// Same settings with red-black ordering
    pub fn red_black(mut self) -> Self {
        self.use_red_black_ordering = true;
        self
    }

    pub fn validate(&self) -> Result<(), FdmError> {
        check_nonzero("max_iterations", self.max_iterations)?;
        check_nonzero("residual_check_interval", self.residual_check_interval)?;
        check_tolerance("tolerance", self.tolerance)?;
        check_sor_factor(self.sor_factor)
    }
}

/// Repeated Gauss-Seidel / SOR sweeps until the residual drops below the tolerance
///
/// `system.x` is the initial guess.
#[derive(Debug, Clone, Default)]
pub struct FdmGaussSeidelSolver {
    config: GaussSeidelConfig,
    buffer: FdmVector,
    residual: FdmVector,
    stats: SolveStats,
}

impl FdmGaussSeidelSolver {
    pub fn new(config: GaussSeidelConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GaussSeidelConfig {
        &self.config
    }
}

impl FdmLinearSystemSolver for FdmGaussSeidelSolver {
    fn solve(&mut self, system: &mut FdmLinearSystem) -> Result<FdmSolution, FdmError> {
        self.config.validate()?;
        system.validate()?;

        let size = system.size();
        self.buffer.resize(size);
        self.residual.resize(size);

        let config = &self.config;
        let mut history = Vec::new();
        residual(&system.a, &system.x, &system.b, &mut self.residual);
        let mut residual_norm = l2_norm(&self.residual);
        let mut iterations = 0;

        while residual_norm > config.tolerance && iterations < config.max_iterations {
            relax(
                &system.a,
                &system.b,
                config.sor_factor,
                config.use_red_black_ordering,
                &mut system.x,
                &mut self.buffer,
            );
            iterations += 1;

            let check = iterations % config.residual_check_interval == 0;
            if check || iterations == config.max_iterations {
                residual(&system.a, &system.x, &system.b, &mut self.residual);
                residual_norm = l2_norm(&self.residual);
                history.push(residual_norm);
            }
        }

        self.stats = SolveStats {
            iterations,
            residual: residual_norm,
        };
        Ok(finish(
            "Gauss-Seidel",
            config.success_policy,
            config.tolerance,
            config.max_iterations,
            self.stats,
            history,
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
