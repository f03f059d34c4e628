//! Error types for the finite-difference solvers
//!
//! Only programmer errors surface here (mismatched shapes, broken hierarchies,
//! nonsensical settings). Numerical trouble such as a zero pivot is handled
//! locally by the kernels and never becomes an error.

use crate::grid::Size3;
use thiserror::Error;

/// Errors returned by solver entry points
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FdmError {
    #[error("{what} has resolution {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: Size3,
        actual: Size3,
    },
    #[error("multigrid system has no levels")]
    EmptyHierarchy,
    #[error("multigrid level {level} has resolution {actual}, expected {expected}")]
    HierarchyMismatch {
        level: usize,
        expected: Size3,
        actual: Size3,
    },
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

pub(crate) fn check_tolerance(name: &str, value: f64) -> Result<(), FdmError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FdmError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

pub(crate) fn check_nonzero(name: &str, value: usize) -> Result<(), FdmError> {
    if value > 0 {
        Ok(())
    } else {
        Err(FdmError::InvalidConfig(format!("{name} must be at least 1")))
    }
}

pub(crate) fn check_sor_factor(value: f64) -> Result<(), FdmError> {
    if value > 0.0 && value < 2.0 {
        Ok(())
    } else {
        Err(FdmError::InvalidConfig(format!(
            "sor_factor must lie in (0, 2), got {value}"
        )))
    }
}
