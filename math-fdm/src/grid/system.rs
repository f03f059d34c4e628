//! Linear system triple: matrix, solution and right-hand side

use super::{FdmMatrix, FdmVector, Size3};
use crate::error::FdmError;

/// A stencil linear system `A x = b`
///
/// Assembled by the caller for each pressure solve; solvers overwrite `x`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdmLinearSystem {
    /// System matrix
    pub a: FdmMatrix,
    /// Solution
    pub x: FdmVector,
    /// Right-hand side
    pub b: FdmVector,
}

impl FdmLinearSystem {
    /// All-zero system of the given resolution
    pub fn new(size: Size3) -> Self {
        Self {
            a: FdmMatrix::new(size),
            x: FdmVector::new(size),
            b: FdmVector::new(size),
        }
    }

    pub fn new_2d(nx: usize, ny: usize) -> Self {
        Self::new(Size3::new_2d(nx, ny))
    }

    pub fn size(&self) -> Size3 {
        self.a.size()
    }

    /// Reallocate every member; all values become zero
    pub fn resize(&mut self, size: Size3) {
        self.a.resize(size);
        self.x.resize(size);
        self.b.resize(size);
    }

    /// Drop all storage
    pub fn clear(&mut self) {
        self.resize(Size3::default());
    }

    /// Check that solution and right-hand side match the matrix resolution
    pub fn validate(&self) -> Result<(), FdmError> {
        check_size("solution", self.a.size(), self.x.size())?;
        check_size("right-hand side", self.a.size(), self.b.size())
    }
}

pub(crate) fn check_size(
    what: &'static str,
    expected: Size3,
    actual: Size3,
) -> Result<(), FdmError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FdmError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}
