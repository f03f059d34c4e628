//! Shared Poisson-system builders for the integration tests

#![allow(dead_code)]

use math_fdm::blas::mvm;
use math_fdm::{
    FdmLinearSystem, FdmMatrix, FdmMatrixRow, FdmMgLinearSystem, FdmVector, MgParameters, Size3,
};
use std::f64::consts::PI;

/// Cell-centred Poisson matrix with zero Dirichlet boundaries, scaled by `scale`
pub fn poisson_matrix(size: Size3, scale: f64) -> FdmMatrix {
    let dims = [size.x, size.y, size.z]
        .iter()
        .filter(|&&n| n > 1)
        .count()
        .max(1);
    FdmMatrix::from_fn(size, |i, j, k| FdmMatrixRow {
        center: 2.0 * dims as f64 * scale,
        right: if i + 1 < size.x { -scale } else { 0.0 },
        up: if j + 1 < size.y { -scale } else { 0.0 },
        front: if k + 1 < size.z { -scale } else { 0.0 },
    })
}

/// Poisson matrix of a closed box: every wall is Neumann, so the operator
/// is singular with the constants as null space
pub fn neumann_matrix(size: Size3, scale: f64) -> FdmMatrix {
    let neighbours = |i: usize, n: usize| (i > 0) as usize + (i + 1 < n) as usize;
    FdmMatrix::from_fn(size, |i, j, k| FdmMatrixRow {
        center: scale
            * (neighbours(i, size.x) + neighbours(j, size.y) + neighbours(k, size.z)) as f64,
        right: if i + 1 < size.x { -scale } else { 0.0 },
        up: if j + 1 < size.y { -scale } else { 0.0 },
        front: if k + 1 < size.z { -scale } else { 0.0 },
    })
}

/// Single-level Poisson system with a zero right-hand side
pub fn poisson_system(size: Size3) -> FdmLinearSystem {
    let mut system = FdmLinearSystem::new(size);
    system.a = poisson_matrix(size, 1.0);
    system
}

/// Poisson hierarchy; each coarser level doubles the grid spacing, which
/// scales its operator by 1/4
pub fn poisson_mg_system(finest: Size3, params: &MgParameters) -> FdmMgLinearSystem {
    let mut system = FdmMgLinearSystem::with_finest(
        finest,
        params.max_number_of_levels,
        params.min_coarsest_resolution,
    );
    let mut scale = 1.0;
    for level in &mut system.a.levels {
        *level = poisson_matrix(level.size(), scale);
        scale *= 0.25;
    }
    system
}

/// All-Neumann counterpart of [`poisson_mg_system`]
pub fn neumann_mg_system(finest: Size3, params: &MgParameters) -> FdmMgLinearSystem {
    let mut system = poisson_mg_system(finest, params);
    let mut scale = 1.0;
    for level in &mut system.a.levels {
        *level = neumann_matrix(level.size(), scale);
        scale *= 0.25;
    }
    system
}

/// Zero-sum field alternating +1 / -1 between neighbouring cells
pub fn checkerboard(size: Size3) -> FdmVector {
    FdmVector::from_fn(size, |i, j, k| {
        if (i + j + k) % 2 == 0 { 1.0 } else { -1.0 }
    })
}

/// Linear ramp x(i, j, k) = i + j + k
pub fn linear_field(size: Size3) -> FdmVector {
    FdmVector::from_fn(size, |i, j, k| (i + j + k) as f64)
}

/// Smooth field vanishing towards the boundary: Π sin(π (i + 1/2) / n)
pub fn smooth_field(size: Size3) -> FdmVector {
    let axis = |i: usize, n: usize| {
        if n > 1 {
            (PI * (i as f64 + 0.5) / n as f64).sin()
        } else {
            1.0
        }
    };
    FdmVector::from_fn(size, |i, j, k| {
        axis(i, size.x) * axis(j, size.y) * axis(k, size.z)
    })
}

/// Right-hand side b = A * exact
pub fn manufactured_rhs(a: &FdmMatrix, exact: &FdmVector) -> FdmVector {
    let mut b = FdmVector::new(a.size());
    mvm(a, exact, &mut b);
    b
}

/// max |x - exact|
pub fn max_error(x: &FdmVector, exact: &FdmVector) -> f64 {
    x.iter()
        .zip(exact.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
