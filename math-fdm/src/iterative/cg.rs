//! PCG (Preconditioned Conjugate Gradient) driver
//!
//! The Conjugate Gradient method for symmetric positive definite stencil
//! systems, with a pluggable preconditioner. Each iteration costs one
//! matrix-vector product, one preconditioner application, two dot products
//! and three vector updates.

use crate::blas::{axpy, dot, l2_norm, mvm, residual, xpay};
use crate::error::{FdmError, check_nonzero, check_tolerance};
use crate::grid::{FdmMatrix, FdmVector, Size3};
use crate::traits::{Preconditioner, SuccessPolicy};

/// Denominators with a smaller magnitude are treated as zero
const DENOMINATOR_EPSILON: f64 = 1e-30;

/// CG solver configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CgConfig {
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual 2-norm
    pub tolerance: f64,
    /// Recompute r = b - Ax from scratch every N iterations (0 = never)
    pub residual_recompute_interval: usize,
    /// Print progress every N iterations (0 = no output)
    pub print_interval: usize,
    /// How the final residual and iteration count map to success
    pub success_policy: SuccessPolicy,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
            residual_recompute_interval: 50,
            print_interval: 0,
            success_policy: SuccessPolicy::default(),
        }
    }
}

impl CgConfig {
    /// Configuration with the given budget and tolerance, defaults elsewhere
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), FdmError> {
        check_nonzero("max_iterations", self.max_iterations)?;
        check_tolerance("tolerance", self.tolerance)
    }
}

/// Scratch vectors for [`pcg`], kept by solvers between calls
#[derive(Debug, Clone, Default)]
pub struct CgBuffers {
    /// Residual
    pub r: FdmVector,
    /// Search direction
    pub d: FdmVector,
    /// A * d
    pub q: FdmVector,
    /// Preconditioned residual
    pub s: FdmVector,
}

impl CgBuffers {
    pub fn new(size: Size3) -> Self {
        Self {
            r: FdmVector::new(size),
            d: FdmVector::new(size),
            q: FdmVector::new(size),
            s: FdmVector::new(size),
        }
    }

    /// Resize (reusing storage when the resolution is unchanged) and zero all buffers
    pub fn resize(&mut self, size: Size3) {
        self.r.resize(size);
        self.d.resize(size);
        self.q.resize(size);
        self.s.resize(size);
    }
}

/// PCG result
#[derive(Debug, Clone, PartialEq)]
pub struct PcgResult {
    /// Number of iterations
    pub iterations: usize,
    /// Final residual 2-norm
    pub residual: f64,
    /// Residual 2-norm after each iteration
    pub residual_history: Vec<f64>,
}

/// Solve A x = b with preconditioned Conjugate Gradient
///
/// `x` is used as the initial guess and overwritten with the solution. The
/// loop stops once ||r||_2 <= `config.tolerance` or after
/// `config.max_iterations` iterations. A numerically zero step denominator
/// (d, Ad) yields a zero step and ends the iteration early instead of
/// producing NaNs.
///
/// Note: this method is only correct for symmetric positive (semi-)definite
/// matrices and a symmetric positive definite preconditioner.
pub fn pcg<P>(
    a: &FdmMatrix,
    b: &FdmVector,
    x: &mut FdmVector,
    preconditioner: &mut P,
    buffers: &mut CgBuffers,
    config: &CgConfig,
) -> PcgResult
where
    P: Preconditioner + ?Sized,
{
    assert_eq!(a.size(), b.size(), "Matrix and vector resolutions must match");
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");

    buffers.resize(a.size());
    let CgBuffers { r, d, q, s } = buffers;

    // r = b - Ax
    residual(a, x, b, r);
    let mut residual_norm = l2_norm(r);
    let mut residual_history = Vec::new();

    if residual_norm <= config.tolerance {
        return PcgResult {
            iterations: 0,
            residual: residual_norm,
            residual_history,
        };
    }

    // d = M r
    preconditioner.solve(r, d);
    let mut sigma = dot(r, d);
    let mut refresh_residual = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        // q = A d
        mvm(a, d, q);

        // alpha = (r, s) / (d, q)
        let dq = dot(d, q);
        if dq.abs() <= DENOMINATOR_EPSILON {
            log::debug!(
                "CG iteration {}: zero step denominator, stopping at residual {:.6e}",
                iterations + 1,
                residual_norm
            );
            break;
        }
        let alpha = sigma / dq;

        // x = x + alpha * d
        axpy(alpha, d, x);

        let recompute = config.residual_recompute_interval > 0
            && iterations > 0
            && iterations % config.residual_recompute_interval == 0;
        if refresh_residual || recompute {
            residual(a, x, b, r);
            refresh_residual = false;
        } else {
            // r = r - alpha * q
            axpy(-alpha, q, r);
        }

        iterations += 1;
        residual_norm = l2_norm(r);
        residual_history.push(residual_norm);

        if config.print_interval > 0 && iterations % config.print_interval == 0 {
            log::info!(
                "CG iteration {}: residual = {:.6e}",
                iterations,
                residual_norm
            );
        }

        if residual_norm <= config.tolerance {
            break;
        }

        // s = M r
        preconditioner.solve(r, s);
        let sigma_old = sigma;
        sigma = dot(r, s);
        if sigma > sigma_old {
            refresh_residual = true;
        }

        let beta = if sigma_old.abs() > DENOMINATOR_EPSILON {
            sigma / sigma_old
        } else {
            0.0
        };

        // d = s + beta * d
        xpay(s, beta, d);
    }

    PcgResult {
        iterations,
        residual: residual_norm,
        residual_history,
    }
}
