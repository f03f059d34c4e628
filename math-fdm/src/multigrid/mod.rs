//! Geometric multigrid on stencil systems
//!
//! - [`hierarchy`]: multi-level matrices, vectors and linear systems
//! - [`transfer`]: restriction and correction between adjacent levels
//! - [`cycle`]: the V-cycle and its parameters

pub mod cycle;
pub mod hierarchy;
pub mod transfer;

pub use cycle::{MgParameters, MgResult, mg_v_cycle};
pub use hierarchy::{
    FdmMgLinearSystem, FdmMgMatrix, FdmMgVector, level_resolutions_with_coarsest,
    level_resolutions_with_finest,
};
pub use transfer::{correct, restrict};
