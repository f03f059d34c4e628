//! Jacobi relaxation

use super::DIAGONAL_EPSILON;
use crate::grid::{FdmMatrix, FdmVector};
use crate::parallel::parallel_rows_mut;

/// One Jacobi sweep
///
/// Every cell is updated from the previous iterate only, so the new values
/// are written to `buffer` in parallel and the two fields are swapped at the
/// end. On return `x` holds the new iterate and `buffer` the old one.
pub fn jacobi_relax(a: &FdmMatrix, b: &FdmVector, x: &mut FdmVector, buffer: &mut FdmVector) {
    assert_eq!(a.size(), x.size(), "Matrix and vector resolutions must match");
    assert_eq!(x.size(), b.size(), "Field resolutions must match");
    if buffer.size() != x.size() {
        buffer.resize(x.size());
    }

    let size = a.size();
    let (xs, bs) = (x.as_slice(), b.as_slice());
    let rows = a.as_slice();
    parallel_rows_mut(buffer.as_slice_mut(), size.x, |r, out| {
        let (j, k) = (r % size.y, r / size.y);
        let base = r * size.x;
        for (i, value) in out.iter_mut().enumerate() {
            let idx = base + i;
            let center = rows[idx].center;
            *value = if center.abs() > DIAGONAL_EPSILON {
                (bs[idx] - a.off_diagonal_at(xs, i, j, k)) / center
            } else {
                xs[idx]
            };
        }
    });

    std::mem::swap(x, buffer);
}
