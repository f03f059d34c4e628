//! Multigrid hierarchy of stencil systems
//!
//! Level 0 is the finest grid. Each following level halves every axis,
//! rounding up, so a 25-cell axis coarsens to 13, then 7, 4, 2 and 1.

use crate::error::FdmError;
use crate::grid::{FdmMatrix, FdmVector, Size3, check_size};

/// Resolutions of a hierarchy built down from `finest`
///
/// Coarsening stops once `max_number_of_levels` levels exist, once a
/// coarsened axis would drop below `min_coarsest_resolution`, or once the
/// grid is a single cell.
pub fn level_resolutions_with_finest(
    finest: Size3,
    max_number_of_levels: usize,
    min_coarsest_resolution: usize,
) -> Vec<Size3> {
    let mut resolutions = Vec::with_capacity(max_number_of_levels);
    if max_number_of_levels == 0 {
        return resolutions;
    }
    resolutions.push(finest);

    while resolutions.len() < max_number_of_levels {
        let current = resolutions[resolutions.len() - 1];
        let next = current.coarsened();
        if next == current {
            break;
        }
        let too_small = [(current.x, next.x), (current.y, next.y), (current.z, next.z)]
            .into_iter()
            .any(|(c, n)| c > 1 && n < min_coarsest_resolution);
        if too_small {
            break;
        }
        resolutions.push(next);
    }

    resolutions
}

/// Resolutions of a hierarchy with exactly `number_of_levels` levels built up
/// from `coarsest` by doubling every resolved axis
pub fn level_resolutions_with_coarsest(coarsest: Size3, number_of_levels: usize) -> Vec<Size3> {
    let mut resolutions = Vec::with_capacity(number_of_levels);
    let mut current = coarsest;
    for _ in 0..number_of_levels {
        resolutions.push(current);
        current = current.refined();
    }
    resolutions.reverse();
    resolutions
}

/// Stencil matrices of every level, finest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdmMgMatrix {
    pub levels: Vec<FdmMatrix>,
}

impl FdmMgMatrix {
    pub fn with_resolutions(resolutions: &[Size3]) -> Self {
        Self {
            levels: resolutions.iter().map(|&s| FdmMatrix::new(s)).collect(),
        }
    }

    pub fn number_of_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn finest(&self) -> Option<&FdmMatrix> {
        self.levels.first()
    }

    pub fn resolutions(&self) -> Vec<Size3> {
        self.levels.iter().map(FdmMatrix::size).collect()
    }
}

/// Fields of every level, finest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdmMgVector {
    pub levels: Vec<FdmVector>,
}

impl FdmMgVector {
    pub fn with_resolutions(resolutions: &[Size3]) -> Self {
        Self {
            levels: resolutions.iter().map(|&s| FdmVector::new(s)).collect(),
        }
    }

    pub fn number_of_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn finest(&self) -> Option<&FdmVector> {
        self.levels.first()
    }

    /// Match the given resolutions, reusing storage where a level already fits;
    /// every value becomes zero
    pub fn resize_to(&mut self, resolutions: &[Size3]) {
        self.levels.truncate(resolutions.len());
        for (level, &size) in self.levels.iter_mut().zip(resolutions) {
            level.resize(size);
        }
        let existing = self.levels.len();
        self.levels
            .extend(resolutions[existing..].iter().map(|&s| FdmVector::new(s)));
    }
}

/// Multigrid linear system: one `A x = b` per level, finest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdmMgLinearSystem {
    pub a: FdmMgMatrix,
    pub x: FdmMgVector,
    pub b: FdmMgVector,
}

impl FdmMgLinearSystem {
    /// Hierarchy built down from `finest`
    pub fn with_finest(
        finest: Size3,
        max_number_of_levels: usize,
        min_coarsest_resolution: usize,
    ) -> Self {
        let mut system = Self::default();
        system.resize_with_finest(finest, max_number_of_levels, min_coarsest_resolution);
        system
    }

    pub fn clear(&mut self) {
        self.a.levels.clear();
        self.x.levels.clear();
        self.b.levels.clear();
    }

    pub fn number_of_levels(&self) -> usize {
        self.a.number_of_levels()
    }

    /// Finest resolution, if the hierarchy is not empty
    pub fn finest_size(&self) -> Option<Size3> {
        self.a.finest().map(FdmMatrix::size)
    }

    /// Reallocate as a hierarchy built down from `finest`; all values become zero
    pub fn resize_with_finest(
        &mut self,
        finest: Size3,
        max_number_of_levels: usize,
        min_coarsest_resolution: usize,
    ) {
        let resolutions =
            level_resolutions_with_finest(finest, max_number_of_levels, min_coarsest_resolution);
        self.resize_to(&resolutions);
    }

    /// Reallocate as `number_of_levels` levels built up from `coarsest`
    pub fn resize_with_coarsest(&mut self, coarsest: Size3, number_of_levels: usize) {
        let resolutions = level_resolutions_with_coarsest(coarsest, number_of_levels);
        self.resize_to(&resolutions);
    }

    fn resize_to(&mut self, resolutions: &[Size3]) {
        log::debug!(
            "Multigrid hierarchy: {}",
            resolutions
                .iter()
                .map(Size3::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        self.a = FdmMgMatrix::with_resolutions(resolutions);
        self.x.resize_to(resolutions);
        self.b.resize_to(resolutions);
    }

    /// Check level count, per-level shapes and the coarsening relation
    pub fn validate(&self) -> Result<(), FdmError> {
        validate_hierarchy(&self.a, &[&self.x, &self.b])
    }
}

fn validate_hierarchy(a: &FdmMgMatrix, fields: &[&FdmMgVector]) -> Result<(), FdmError> {
    let finest = a.finest().ok_or(FdmError::EmptyHierarchy)?;
    let mut expected = finest.size();
    for (level, matrix) in a.levels.iter().enumerate() {
        if matrix.size() != expected {
            return Err(FdmError::HierarchyMismatch {
                level,
                expected,
                actual: matrix.size(),
            });
        }
        expected = expected.coarsened();
    }

    for field in fields {
        if field.number_of_levels() != a.number_of_levels() {
            return Err(FdmError::InvalidConfig(format!(
                "hierarchy has {} matrix levels but {} vector levels",
                a.number_of_levels(),
                field.number_of_levels()
            )));
        }
        for (matrix, vector) in a.levels.iter().zip(&field.levels) {
            check_size("multigrid level vector", matrix.size(), vector.size())?;
        }
    }
    Ok(())
}
