//! Stencil builders shared by unit tests

use crate::grid::{FdmMatrix, FdmMatrixRow, Size3};
use crate::multigrid::FdmMgMatrix;

/// Cell-centred Poisson matrix with zero Dirichlet boundaries, scaled by `scale`
pub(crate) fn poisson_matrix(size: Size3, scale: f64) -> FdmMatrix {
    let dims = [size.x, size.y, size.z].iter().filter(|&&n| n > 1).count().max(1);
    FdmMatrix::from_fn(size, |i, j, k| FdmMatrixRow {
        center: 2.0 * dims as f64 * scale,
        right: if i + 1 < size.x { -scale } else { 0.0 },
        up: if j + 1 < size.y { -scale } else { 0.0 },
        front: if k + 1 < size.z { -scale } else { 0.0 },
    })
}

/// Fill every level with the Poisson matrix of its grid spacing
///
/// Doubling the spacing scales the operator by 1/4.
pub(crate) fn fill_poisson_hierarchy(a: &mut FdmMgMatrix) {
    let mut scale = 1.0;
    for level in &mut a.levels {
        *level = poisson_matrix(level.size(), scale);
        scale *= 0.25;
    }
}
