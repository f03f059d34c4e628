//! IC(0) preconditioner
//!
//! Incomplete Cholesky factorization of the stencil matrix with no fill-in:
//! M = (D^-1 + L) D (D^-1 + L^T), where L is the strictly lower part of A.
//! The factor keeps the sparsity pattern of the stencil, so only the inverse
//! pivots `d` are stored next to a copy of the stencil coefficients.

use crate::grid::{FdmMatrix, FdmVector};
use crate::smoothers::DIAGONAL_EPSILON;
use crate::traits::Preconditioner;

/// IC(0) preconditioner for 5-point (2D) and 7-point (3D) stencils
#[derive(Debug, Clone, Default)]
pub struct IncompleteCholeskyPreconditioner {
    /// Stencil the factorization was built from
    matrix: FdmMatrix,
    /// Inverse pivots
    d: FdmVector,
    /// Forward-substitution result
    y: FdmVector,
}

impl IncompleteCholeskyPreconditioner {
    /// Factorize `matrix`
    pub fn new(matrix: &FdmMatrix) -> Self {
        let mut precond = Self::default();
        precond.build(matrix);
        precond
    }

    /// Refactorize for `matrix`, reusing the allocated buffers when the
    /// resolution is unchanged
    ///
    /// Pivots are computed in natural (x fastest) order:
    /// `d = 1 / (center - Σ a_lower² d_lower)` over the -x, -y and -z
    /// neighbours. A vanishing pivot yields `d = 0`, which leaves that cell
    /// untouched by the preconditioner.
    pub fn build(&mut self, matrix: &FdmMatrix) {
        let size = matrix.size();
        if self.matrix.size() == size {
            self.matrix.as_slice_mut().copy_from_slice(matrix.as_slice());
        } else {
            self.matrix = matrix.clone();
        }
        self.d.resize(size);
        self.y.resize(size);

        let (sx, sxy) = (size.x, size.x * size.y);
        let a = self.matrix.as_slice();
        let d = self.d.as_slice_mut();

        for idx in 0..size.len() {
            let (i, j, k) = size.coords(idx);
            let mut denom = a[idx].center;
            if i > 0 {
                let n = idx - 1;
                denom -= a[n].right * a[n].right * d[n];
            }
            if j > 0 {
                let n = idx - sx;
                denom -= a[n].up * a[n].up * d[n];
            }
            if k > 0 {
                let n = idx - sxy;
                denom -= a[n].front * a[n].front * d[n];
            }
            d[idx] = if denom.abs() > DIAGONAL_EPSILON {
                1.0 / denom
            } else {
                0.0
            };
        }
    }
}

impl Preconditioner for IncompleteCholeskyPreconditioner {
    fn solve(&mut self, b: &FdmVector, x: &mut FdmVector) {
        let size = self.matrix.size();
        assert_eq!(size, b.size(), "Matrix and vector resolutions must match");
        assert_eq!(size, x.size(), "Matrix and vector resolutions must match");

        let (sx, sxy) = (size.x, size.x * size.y);
        let a = self.matrix.as_slice();
        let d = self.d.as_slice();
        let bs = b.as_slice();

        // Forward substitution: (D^-1 + L) y = b
        let y = self.y.as_slice_mut();
        for idx in 0..size.len() {
            let (i, j, k) = size.coords(idx);
            let mut sum = bs[idx];
            if i > 0 {
                sum -= a[idx - 1].right * y[idx - 1];
            }
            if j > 0 {
                sum -= a[idx - sx].up * y[idx - sx];
            }
            if k > 0 {
                sum -= a[idx - sxy].front * y[idx - sxy];
            }
            y[idx] = sum * d[idx];
        }

        // Backward substitution: D (D^-1 + L^T) x = y
        let xs = x.as_slice_mut();
        for idx in (0..size.len()).rev() {
            let (i, j, k) = size.coords(idx);
            let row = a[idx];
            let mut upper = 0.0;
            if i + 1 < size.x {
                upper += row.right * xs[idx + 1];
            }
            if j + 1 < size.y {
                upper += row.up * xs[idx + sx];
            }
            if k + 1 < size.z {
                upper += row.front * xs[idx + sxy];
            }
            xs[idx] = y[idx] - d[idx] * upper;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blas::{mvm, residual};
    use crate::grid::{FdmMatrixRow, Size3};
    use crate::iterative::{CgBuffers, CgConfig, pcg};
    use crate::test_support::poisson_matrix;
    use crate::traits::IdentityPreconditioner;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_on_tridiagonal() {
        // A tridiagonal stencil has no fill-in, so IC(0) is the exact Cholesky factor
        let a = poisson_matrix(Size3::new_1d(10), 1.0);
        let b = FdmVector::from_fn(a.size(), |i, _, _| (i as f64).sin());
        let mut x = FdmVector::new(a.size());

        let mut precond = IncompleteCholeskyPreconditioner::new(&a);
        precond.solve(&b, &mut x);

        let mut ax = FdmVector::new(a.size());
        mvm(&a, &x, &mut ax);
        for (axi, bi) in ax.iter().zip(b.iter()) {
            assert_relative_eq!(*axi, *bi, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_diagonal_matrix_inverts_diagonal() {
        let size = Size3::new(3, 2, 2);
        let a = FdmMatrix::from_fn(size, |i, _, _| {
            FdmMatrixRow::new(1.0 + i as f64, 0.0, 0.0, 0.0)
        });
        let b = FdmVector::from_elem(size, 6.0);
        let mut x = FdmVector::new(size);

        IncompleteCholeskyPreconditioner::new(&a).solve(&b, &mut x);

        assert_relative_eq!(x[(0, 1, 1)], 6.0);
        assert_relative_eq!(x[(2, 0, 1)], 2.0);
    }

    #[test]
    fn test_zero_pivot_leaves_cell_zero() {
        let a = FdmMatrix::new(Size3::new_2d(3, 3));
        let b = FdmVector::from_elem(a.size(), 1.0);
        let mut x = FdmVector::from_elem(a.size(), 5.0);

        IncompleteCholeskyPreconditioner::new(&a).solve(&b, &mut x);

        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_iccg_beats_plain_cg() {
        let a = poisson_matrix(Size3::new(12, 12, 12), 1.0);
        let b = FdmVector::from_elem(a.size(), 1.0);
        let config = CgConfig::new(500, 1e-8);
        let mut buffers = CgBuffers::default();

        let mut x_plain = FdmVector::new(a.size());
        let plain = pcg(&a, &b, &mut x_plain, &mut IdentityPreconditioner, &mut buffers, &config);

        let mut x_ic = FdmVector::new(a.size());
        let mut precond = IncompleteCholeskyPreconditioner::new(&a);
        let ic = pcg(&a, &b, &mut x_ic, &mut precond, &mut buffers, &config);

        assert!(ic.residual <= 1e-8);
        assert!(
            ic.iterations < plain.iterations,
            "ICCG took {} iterations, CG {}",
            ic.iterations,
            plain.iterations
        );

        let mut r = FdmVector::new(a.size());
        residual(&a, &x_ic, &b, &mut r);
        assert!(crate::blas::l2_norm(&r) < 1e-7);
    }

    #[test]
    fn test_rebuild_tracks_new_matrix() {
        let original = poisson_matrix(Size3::new_1d(4), 1.0);
        let mut precond = IncompleteCholeskyPreconditioner::new(&original);
        let scaled = poisson_matrix(Size3::new_1d(4), 2.0);
        precond.build(&scaled);

        let b = FdmVector::from_elem(scaled.size(), 1.0);
        let mut x = FdmVector::new(scaled.size());
        precond.solve(&b, &mut x);

        let mut ax = FdmVector::new(scaled.size());
        mvm(&scaled, &x, &mut ax);
        for v in ax.iter() {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
    }
}
