//! Matrix-free stencil operator
//!
//! Each cell stores its diagonal and the couplings to its +x, +y and +z
//! neighbours. The coupling to the -x neighbour of cell `(i, j, k)` is the
//! `right` entry of cell `(i - 1, j, k)`, which makes the operator symmetric
//! by construction.

use super::Size3;
use ndarray::Array3;
use std::ops::{Index, IndexMut};

/// Stencil coefficients of one cell
///
/// 2D systems leave `front` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FdmMatrixRow {
    /// Diagonal entry A(i,j,k; i,j,k)
    pub center: f64,
    /// Off-diagonal entry A(i,j,k; i+1,j,k)
    pub right: f64,
    /// Off-diagonal entry A(i,j,k; i,j+1,k)
    pub up: f64,
    /// Off-diagonal entry A(i,j,k; i,j,k+1)
    pub front: f64,
}

impl FdmMatrixRow {
    pub const fn new(center: f64, right: f64, up: f64, front: f64) -> Self {
        Self {
            center,
            right,
            up,
            front,
        }
    }
}

/// Symmetric 5-point (2D) / 7-point (3D) stencil matrix
#[derive(Debug, Clone, PartialEq)]
pub struct FdmMatrix {
    size: Size3,
    /// Stored as `[k, j, i]`
    rows: Array3<FdmMatrixRow>,
}

impl Default for FdmMatrix {
    fn default() -> Self {
        Self::new(Size3::default())
    }
}

impl FdmMatrix {
    /// All-zero stencil of the given resolution
    pub fn new(size: Size3) -> Self {
        Self {
            size,
            rows: Array3::from_elem((size.z, size.y, size.x), FdmMatrixRow::default()),
        }
    }

    pub fn new_2d(nx: usize, ny: usize) -> Self {
        Self::new(Size3::new_2d(nx, ny))
    }

    /// Stencil whose row at `(i, j, k)` is `f(i, j, k)`
    pub fn from_fn<F>(size: Size3, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> FdmMatrixRow,
    {
        Self {
            size,
            rows: Array3::from_shape_fn((size.z, size.y, size.x), |(k, j, i)| f(i, j, k)),
        }
    }

    pub fn size(&self) -> Size3 {
        self.size
    }

    /// Reallocate to a new resolution; all coefficients become zero
    pub fn resize(&mut self, size: Size3) {
        if size == self.size {
            self.rows.fill(FdmMatrixRow::default());
        } else {
            *self = Self::new(size);
        }
    }

    /// Set every row to the same coefficients
    pub fn set(&mut self, row: FdmMatrixRow) {
        self.rows.fill(row);
    }

    #[inline]
    pub fn as_slice(&self) -> &[FdmMatrixRow] {
        self.rows.as_slice().expect("Array should be contiguous")
    }

    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [FdmMatrixRow] {
        self.rows.as_slice_mut().expect("Array should be contiguous")
    }

    /// Apply the stencil at one cell: (A x)(i, j, k)
    ///
    /// Neighbours outside the grid contribute nothing.
    #[inline]
    pub fn apply_at(&self, x: &[f64], i: usize, j: usize, k: usize) -> f64 {
        let s = self.size;
        let a = self.as_slice();
        let idx = s.index(i, j, k);
        let row = a[idx];
        let mut sum = row.center * x[idx];
        if i > 0 {
            sum += a[idx - 1].right * x[idx - 1];
        }
        if i + 1 < s.x {
            sum += row.right * x[idx + 1];
        }
        if j > 0 {
            let n = idx - s.x;
            sum += a[n].up * x[n];
        }
        if j + 1 < s.y {
            sum += row.up * x[idx + s.x];
        }
        if k > 0 {
            let n = idx - s.x * s.y;
            sum += a[n].front * x[n];
        }
        if k + 1 < s.z {
            sum += row.front * x[idx + s.x * s.y];
        }
        sum
    }

    /// Sum of off-diagonal couplings times neighbour values at one cell
    #[inline]
    pub fn off_diagonal_at(&self, x: &[f64], i: usize, j: usize, k: usize) -> f64 {
        let idx = self.size.index(i, j, k);
        self.apply_at(x, i, j, k) - self.as_slice()[idx].center * x[idx]
    }
}

impl Index<(usize, usize, usize)> for FdmMatrix {
    type Output = FdmMatrixRow;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &FdmMatrixRow {
        &self.rows[[k, j, i]]
    }
}

impl IndexMut<(usize, usize, usize)> for FdmMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut FdmMatrixRow {
        &mut self.rows[[k, j, i]]
    }
}

impl Index<(usize, usize)> for FdmMatrix {
    type Output = FdmMatrixRow;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &FdmMatrixRow {
        &self.rows[[0, j, i]]
    }
}

impl IndexMut<(usize, usize)> for FdmMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut FdmMatrixRow {
        &mut self.rows[[0, j, i]]
    }
}
