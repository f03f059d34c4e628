//! Gauss-Seidel / SOR relaxation

use super::DIAGONAL_EPSILON;
use crate::grid::{FdmMatrix, FdmVector};
use crate::parallel::parallel_rows_mut;

#[inline]
fn sor_update(
    a: &FdmMatrix,
    xs: &[f64],
    b: f64,
    sor_factor: f64,
    (i, j, k): (usize, usize, usize),
) -> f64 {
    let idx = a.size().index(i, j, k);
    let center = a.as_slice()[idx].center;
    if center.abs() <= DIAGONAL_EPSILON {
        return xs[idx];
    }
    let gs = (b - a.off_diagonal_at(xs, i, j, k)) / center;
    (1.0 - sor_factor) * xs[idx] + sor_factor * gs
}

/// One in-place Gauss-Seidel / SOR sweep in natural (x fastest) order
///
/// `sor_factor` of 1 is plain Gauss-Seidel, above 1 over-relaxes, below 1
/// under-relaxes. Each cell reads neighbours already updated in this sweep,
/// so the sweep is sequential.
pub fn gauss_seidel_relax(a: &FdmMatrix, b: &FdmVector, sor_factor: f64, x: &mut FdmVector) {
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");
    assert_eq!(x.size(), b.size(), "Field resolutions must match");

    let size = a.size();
    let bs = b.as_slice();
    let xs = x.as_slice_mut();
    for idx in 0..size.len() {
        let value = sor_update(a, xs, bs[idx], sor_factor, size.coords(idx));
        xs[idx] = value;
    }
}

/// One Gauss-Seidel / SOR sweep in red-black order
///
/// Cells with even `i + j + k` are updated first, then the odd ones. Within
/// one colour every update only reads cells of the other colour, so each
/// half-sweep is computed into `buffer` in parallel and then copied back.
pub fn gauss_seidel_relax_red_black(
    a: &FdmMatrix,
    b: &FdmVector,
    sor_factor: f64,
    x: &mut FdmVector,
    buffer: &mut FdmVector,
) {
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");
    assert_eq!(x.size(), b.size(), "Field resolutions must match");
    if buffer.size() != x.size() {
        buffer.resize(x.size());
    }

    let size = a.size();
    let bs = b.as_slice();
    for color in 0..2usize {
        let xs = x.as_slice();
        parallel_rows_mut(buffer.as_slice_mut(), size.x, |r, out| {
            let (j, k) = (r % size.y, r / size.y);
            let base = r * size.x;
            let first = (color + j + k) % 2;
            for i in (first..size.x).step_by(2) {
                out[i] = sor_update(a, xs, bs[base + i], sor_factor, (i, j, k));
            }
        });

        let updated = buffer.as_slice();
        parallel_rows_mut(x.as_slice_mut(), size.x, |r, row| {
            let (j, k) = (r % size.y, r / size.y);
            let base = r * size.x;
            let first = (color + j + k) % 2;
            for i in (first..size.x).step_by(2) {
                row[i] = updated[base + i];
            }
        });
    }
}

/// One smoothing sweep, red-black or natural order
pub fn relax(
    a: &FdmMatrix,
    b: &FdmVector,
    sor_factor: f64,
    use_red_black_ordering: bool,
    x: &mut FdmVector,
    buffer: &mut FdmVector,
) {
    if use_red_black_ordering {
        gauss_seidel_relax_red_black(a, b, sor_factor, x, buffer);
    } else {
        gauss_seidel_relax(a, b, sor_factor, x);
    }
}
