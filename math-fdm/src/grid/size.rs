//! Grid resolution

use std::fmt;

/// Resolution of a cell grid along x, y and z
///
/// 2D grids have `z == 1`, 1D grids have `y == z == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size3 {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Size3 {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// A 2D resolution (one cell deep)
    pub const fn new_2d(x: usize, y: usize) -> Self {
        Self { x, y, z: 1 }
    }

    /// A 1D resolution
    pub const fn new_1d(x: usize) -> Self {
        Self { x, y: 1, z: 1 }
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.x * self.y * self.z
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of cell (i, j, k), x fastest
    #[inline]
    pub const fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.x * (j + self.y * k)
    }

    /// Inverse of [`Size3::index`]
    #[inline]
    pub const fn coords(&self, idx: usize) -> (usize, usize, usize) {
        let i = idx % self.x;
        let rest = idx / self.x;
        (i, rest % self.y, rest / self.y)
    }

    /// The next coarser multigrid resolution: every axis halved, rounding up
    pub const fn coarsened(&self) -> Self {
        Self {
            x: self.x.div_ceil(2),
            y: self.y.div_ceil(2),
            z: self.z.div_ceil(2),
        }
    }

    /// The next finer multigrid resolution: every axis with extent above one doubled
    pub const fn refined(&self) -> Self {
        const fn double(n: usize) -> usize {
            if n > 1 { 2 * n } else { n }
        }
        Self {
            x: double(self.x),
            y: double(self.y),
            z: double(self.z),
        }
    }
}

impl fmt::Display for Size3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
