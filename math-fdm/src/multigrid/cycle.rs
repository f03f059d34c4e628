//! Multigrid V-cycle
//!
//! One V-cycle descends from the finest to the coarsest level, smoothing and
//! restricting the residual on the way down, then interpolates the coarse
//! corrections back up. The smoother is Gauss-Seidel / SOR in natural or
//! red-black order.

use super::hierarchy::{FdmMgMatrix, FdmMgVector};
use super::transfer::{correct, restrict};
use crate::blas::{l2_norm, residual};
use crate::error::{FdmError, check_nonzero, check_sor_factor, check_tolerance};
use crate::grid::{FdmMatrix, FdmVector};
use crate::smoothers::relax;

/// Multigrid parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MgParameters {
    /// Upper bound on the number of levels, finest included
    pub max_number_of_levels: usize,
    /// Coarsening stops before any resolved axis drops below this extent
    pub min_coarsest_resolution: usize,
    /// Smoothing sweeps before restricting (pre-smoothing)
    pub number_of_restriction_iter: usize,
    /// Smoothing sweeps after correcting (post-smoothing)
    pub number_of_correction_iter: usize,
    /// Smoothing sweeps on the coarsest level
    pub number_of_coarsest_iter: usize,
    /// Extra smoothing sweeps on the finest level after the cycle
    pub number_of_final_iter: usize,
    /// SOR relaxation factor (1.0 = Gauss-Seidel)
    pub sor_factor: f64,
    /// Red-black ordering (parallel) instead of natural ordering
    pub use_red_black_ordering: bool,
    /// Residual tolerance
    pub max_tolerance: f64,
}

impl Default for MgParameters {
    fn default() -> Self {
        Self {
            max_number_of_levels: 5,
            min_coarsest_resolution: 2,
            number_of_restriction_iter: 5,
            number_of_correction_iter: 5,
            number_of_coarsest_iter: 20,
            number_of_final_iter: 5,
            sor_factor: 1.5,
            use_red_black_ordering: false,
            max_tolerance: 1e-6,
        }
    }
}

impl MgParameters {
    /// Heavier smoothing, suited to preconditioning pressure projections
    pub fn for_pressure() -> Self {
        Self {
            number_of_restriction_iter: 10,
            number_of_correction_iter: 10,
            number_of_coarsest_iter: 10,
            number_of_final_iter: 10,
            ..Default::default()
        }
    }

    /// Red-black smoothing so every sweep runs in parallel
    pub fn for_parallel() -> Self {
        Self {
            use_red_black_ordering: true,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), FdmError> {
        check_nonzero("max_number_of_levels", self.max_number_of_levels)?;
        check_nonzero("min_coarsest_resolution", self.min_coarsest_resolution)?;
        check_sor_factor(self.sor_factor)?;
        check_tolerance("max_tolerance", self.max_tolerance)
    }

    /// Reject hierarchies deeper than `max_number_of_levels`
    pub fn check_level_count(&self, number_of_levels: usize) -> Result<(), FdmError> {
        if number_of_levels <= self.max_number_of_levels {
            Ok(())
        } else {
            Err(FdmError::InvalidConfig(format!(
                "hierarchy has {} levels, max_number_of_levels is {}",
                number_of_levels, self.max_number_of_levels
            )))
        }
    }
}

/// Result of one V-cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MgResult {
    /// 2-norm of the finest-level residual after the cycle
    pub last_residual_norm: f64,
}

fn smooth(
    a: &FdmMatrix,
    b: &FdmVector,
    x: &mut FdmVector,
    buffer: &mut FdmVector,
    sweeps: usize,
    params: &MgParameters,
) {
    for _ in 0..sweeps {
        relax(a, b, params.sor_factor, params.use_red_black_ordering, x, buffer);
    }
}

/// Descend from the first level of the slices to the last and back
fn v_cycle_levels(
    a: &[FdmMatrix],
    x: &mut [FdmVector],
    b: &mut [FdmVector],
    buffer: &mut [FdmVector],
    params: &MgParameters,
) {
    let (Some((a0, a_rest)), Some((x0, x_rest)), Some((b0, b_rest)), Some((buf0, buf_rest))) = (
        a.split_first(),
        x.split_first_mut(),
        b.split_first_mut(),
        buffer.split_first_mut(),
    ) else {
        return;
    };

    if a_rest.is_empty() {
        smooth(a0, b0, x0, buf0, params.number_of_coarsest_iter, params);
        return;
    }

    smooth(a0, b0, x0, buf0, params.number_of_restriction_iter, params);

    // The coarse problem solves A e = r for the error of this level
    residual(a0, x0, b0, buf0);
    restrict(buf0, &mut b_rest[0]);
    x_rest[0].set(0.0);

    v_cycle_levels(a_rest, x_rest, b_rest, buf_rest, params);

    correct(&x_rest[0], x0);
    smooth(a0, b0, x0, buf0, params.number_of_correction_iter, params);
}

/// Run one V-cycle on the hierarchy
///
/// `x.levels[0]` is the initial guess and receives the improved solution;
/// `b.levels[0]` is the right-hand side. Coarser entries of `x` and `b` and
/// all of `buffer` are scratch space and are overwritten.
pub fn mg_v_cycle(
    a: &FdmMgMatrix,
    params: &MgParameters,
    x: &mut FdmMgVector,
    b: &mut FdmMgVector,
    buffer: &mut FdmMgVector,
) -> MgResult {
    let levels = a.number_of_levels();
    assert!(levels > 0, "Multigrid hierarchy must not be empty");
    assert_eq!(levels, x.number_of_levels(), "Hierarchy level counts must match");
    assert_eq!(levels, b.number_of_levels(), "Hierarchy level counts must match");
    assert_eq!(levels, buffer.number_of_levels(), "Hierarchy level counts must match");

    v_cycle_levels(&a.levels, &mut x.levels, &mut b.levels, &mut buffer.levels, params);

    let (a0, x0, b0, buf0) = (&a.levels[0], &mut x.levels[0], &b.levels[0], &mut buffer.levels[0]);
    smooth(a0, b0, x0, buf0, params.number_of_final_iter, params);

    residual(a0, x0, b0, buf0);
    MgResult {
        last_residual_norm: l2_norm(buf0),
    }
}
