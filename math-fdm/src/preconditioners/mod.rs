//! Preconditioners for the CG driver
//!
//! Preconditioners approximate A^(-1) to accelerate convergence of CG.
//!
//! # Available Preconditioners
//!
//! - **IdentityPreconditioner**: plain CG
//! - **IncompleteCholeskyPreconditioner**: IC(0) on the stencil, sequential
//! - **MgPreconditioner**: one multigrid V-cycle, parallel with red-black smoothing

mod incomplete_cholesky;
mod multigrid;

pub use incomplete_cholesky::IncompleteCholeskyPreconditioner;
pub use multigrid::{MgPreconditioner, MgWorkspace};

// Re-export IdentityPreconditioner from traits
pub use crate::traits::IdentityPreconditioner;
