//! Grid-traversal linear algebra kernels
//!
//! Matrix-vector products, dot products and vector updates over
//! [`FdmVector`]s. All kernels work row by row (one x-row of cells per task)
//! and run on the rayon pool when the `rayon` feature is enabled.

use crate::grid::{FdmMatrix, FdmVector};
use crate::parallel::{parallel_max, parallel_rows_mut, parallel_sum};

#[inline]
fn assert_same_size(x: &FdmVector, y: &FdmVector) {
    assert_eq!(x.size(), y.size(), "Field resolutions must match");
}

/// Dot product (x, y) = Σ x_i y_i
pub fn dot(x: &FdmVector, y: &FdmVector) -> f64 {
    assert_same_size(x, y);
    let nx = x.size().x;
    if nx == 0 {
        return 0.0;
    }
    let rows = x.len() / nx;
    let (xs, ys) = (x.as_slice(), y.as_slice());
    parallel_sum(rows, |r| {
        let range = r * nx..(r + 1) * nx;
        xs[range.clone()]
            .iter()
            .zip(&ys[range])
            .map(|(a, b)| a * b)
            .sum()
    })
}

/// Euclidean norm ||x||_2
#[inline]
pub fn l2_norm(x: &FdmVector) -> f64 {
    dot(x, x).sqrt()
}

/// Maximum norm ||x||_inf
pub fn max_norm(x: &FdmVector) -> f64 {
    let xs = x.as_slice();
    parallel_max(xs.len(), |i| xs[i].abs())
}

/// y = α * x + y
pub fn axpy(alpha: f64, x: &FdmVector, y: &mut FdmVector) {
    assert_same_size(x, y);
    let nx = x.size().x;
    let xs = x.as_slice();
    parallel_rows_mut(y.as_slice_mut(), nx, |r, row| {
        let base = r * nx;
        for (i, yi) in row.iter_mut().enumerate() {
            *yi += alpha * xs[base + i];
        }
    });
}

/// y = x + β * y
pub fn xpay(x: &FdmVector, beta: f64, y: &mut FdmVector) {
    assert_same_size(x, y);
    let nx = x.size().x;
    let xs = x.as_slice();
    parallel_rows_mut(y.as_slice_mut(), nx, |r, row| {
        let base = r * nx;
        for (i, yi) in row.iter_mut().enumerate() {
            *yi = xs[base + i] + beta * *yi;
        }
    });
}

/// Matrix-vector product: result = A * x
pub fn mvm(a: &FdmMatrix, x: &FdmVector, result: &mut FdmVector) {
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");
    assert_same_size(x, result);
    let size = a.size();
    let xs = x.as_slice();
    parallel_rows_mut(result.as_slice_mut(), size.x, |r, row| {
        let (j, k) = (r % size.y, r / size.y);
        for (i, out) in row.iter_mut().enumerate() {
            *out = a.apply_at(xs, i, j, k);
        }
    });
}

/// Residual: result = b - A * x
pub fn residual(a: &FdmMatrix, x: &FdmVector, b: &FdmVector, result: &mut FdmVector) {
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");
    assert_same_size(x, b);
    assert_same_size(x, result);
    let size = a.size();
    let (xs, bs) = (x.as_slice(), b.as_slice());
    parallel_rows_mut(result.as_slice_mut(), size.x, |r, row| {
        let (j, k) = (r % size.y, r / size.y);
        let base = r * size.x;
        for (i, out) in row.iter_mut().enumerate() {
            *out = bs[base + i] - a.apply_at(xs, i, j, k);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FdmMatrixRow, Size3};
    use approx::assert_relative_eq;

    fn laplacian_2d(n: usize) -> FdmMatrix {
        FdmMatrix::from_fn(Size3::new_2d(n, n), |i, j, _| FdmMatrixRow {
            center: 4.0,
            right: if i + 1 < n { -1.0 } else { 0.0 },
            up: if j + 1 < n { -1.0 } else { 0.0 },
            front: 0.0,
        })
    }

    #[test]
    fn test_dot_and_norms() {
        let size = Size3::new_2d(3, 2);
        let x = FdmVector::from_fn(size, |i, j, _| (i + 3 * j) as f64);
        let y = FdmVector::from_elem(size, 2.0);

        assert_relative_eq!(dot(&x, &y), 2.0 * 15.0, epsilon = 1e-12);
        assert_relative_eq!(l2_norm(&y), (6.0_f64 * 4.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(max_norm(&x), 5.0);
    }

    #[test]
    fn test_axpy_xpay() {
        let size = Size3::new_1d(3);
        let x = FdmVector::from_fn(size, |i, _, _| i as f64 + 1.0);
        let mut y = FdmVector::from_elem(size, 1.0);

        axpy(2.0, &x, &mut y);
        assert_eq!(y.as_slice(), &[3.0, 5.0, 7.0]);

        xpay(&x, 0.5, &mut y);
        assert_eq!(y.as_slice(), &[2.5, 4.5, 6.5]);
    }

    #[test]
    fn test_mvm_constant_field() {
        let n = 4;
        let a = laplacian_2d(n);
        let x = FdmVector::from_elem(a.size(), 1.0);
        let mut ax = FdmVector::new(a.size());
        mvm(&a, &x, &mut ax);

        // Corner cells miss two neighbours, edge cells one, interior none
        assert_relative_eq!(ax[(0, 0)], 2.0);
        assert_relative_eq!(ax[(1, 0)], 1.0);
        assert_relative_eq!(ax[(1, 1)], 0.0);
        assert_relative_eq!(ax[(3, 3)], 2.0);
    }

    #[test]
    fn test_residual_matches_definition() {
        let a = laplacian_2d(5);
        let x = FdmVector::from_fn(a.size(), |i, j, _| (i * j) as f64);
        let b = FdmVector::from_fn(a.size(), |i, _, _| i as f64);

        let mut ax = FdmVector::new(a.size());
        let mut r = FdmVector::new(a.size());
        mvm(&a, &x, &mut ax);
        residual(&a, &x, &b, &mut r);

        for ((ri, bi), axi) in r.iter().zip(b.iter()).zip(ax.iter()) {
            assert_relative_eq!(*ri, bi - axi, epsilon = 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "Field resolutions must match")]
    fn test_dot_size_mismatch_panics() {
        let x = FdmVector::new_2d(2, 2);
        let y = FdmVector::new_2d(2, 3);
        dot(&x, &y);
    }
}
