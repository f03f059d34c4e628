//! Grid-shaped scalar field

use super::Size3;
use ndarray::Array3;
use std::ops::{Index, IndexMut};

/// Dense scalar field over a cell grid
///
/// Used for the unknown (pressure), the right-hand side and the Krylov
/// scratch vectors. Indexing is `(i, j, k)` with `i` along x. The storage is
/// always contiguous with x fastest so kernels can split it into rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FdmVector {
    size: Size3,
    /// Stored as `[k, j, i]`
    data: Array3<f64>,
}

impl Default for FdmVector {
    fn default() -> Self {
        Self::new(Size3::default())
    }
}

impl FdmVector {
    /// Zero-initialised field of the given resolution
    pub fn new(size: Size3) -> Self {
        Self {
            size,
            data: Array3::zeros((size.z, size.y, size.x)),
        }
    }

    /// Zero-initialised 2D field
    pub fn new_2d(nx: usize, ny: usize) -> Self {
        Self::new(Size3::new_2d(nx, ny))
    }

    /// Field filled with a constant
    pub fn from_elem(size: Size3, value: f64) -> Self {
        Self {
            size,
            data: Array3::from_elem((size.z, size.y, size.x), value),
        }
    }

    /// Field whose value at `(i, j, k)` is `f(i, j, k)`
    pub fn from_fn<F>(size: Size3, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> f64,
    {
        Self {
            size,
            data: Array3::from_shape_fn((size.z, size.y, size.x), |(k, j, i)| f(i, j, k)),
        }
    }

    pub fn size(&self) -> Size3 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Reallocate to a new resolution; all values become zero
    pub fn resize(&mut self, size: Size3) {
        if size == self.size {
            self.data.fill(0.0);
        } else {
            *self = Self::new(size);
        }
    }

    /// Set every cell to `value`
    pub fn set(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Copy values from another field of the same resolution
    pub fn set_from(&mut self, other: &FdmVector) {
        assert_eq!(self.size, other.size, "Field resolutions must match");
        self.data.assign(&other.data);
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice().expect("Array should be contiguous")
    }

    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        self.data.as_slice_mut().expect("Array should be contiguous")
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.as_slice().iter()
    }
}

impl Index<(usize, usize, usize)> for FdmVector {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f64 {
        &self.data[[k, j, i]]
    }
}

impl IndexMut<(usize, usize, usize)> for FdmVector {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f64 {
        &mut self.data[[k, j, i]]
    }
}

impl Index<(usize, usize)> for FdmVector {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[[0, j, i]]
    }
}

impl IndexMut<(usize, usize)> for FdmVector {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[[0, j, i]]
    }
}
