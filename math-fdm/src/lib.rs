//! Grid-based pressure / Poisson solvers for fluid simulation
//!
//! This crate solves the symmetric stencil systems that arise from
//! finite-difference pressure projection on 1D, 2D and 3D cell grids. The
//! matrix is stored matrix-free as one `{center, right, up, front}` row per
//! cell, and all solvers mutate the solution field in place.
//!
//! # Features
//!
//! - **Smoothers**: Jacobi, Gauss-Seidel / SOR, red-black ordering for parallel sweeps
//! - **Krylov Solver**: preconditioned Conjugate Gradient with pluggable preconditioners
//! - **Preconditioners**: identity, IC(0), multigrid V-cycle
//! - **Multigrid**: level hierarchies, restriction / correction, V-cycle driver
//! - **Solver family**: Jacobi, Gauss-Seidel, CG, ICCG, MG and MGPCG behind two traits
//! - **Parallelism**: rayon-backed kernels (feature `rayon`, on by default)
//!
//! # Example
//!
//! ```ignore
//! use math_fdm::{FdmMgLinearSystem, FdmMgLinearSystemSolver, FdmMgpcgSolver, MgpcgConfig, Size3};
//!
//! let config = MgpcgConfig::default();
//! let mut system = FdmMgLinearSystem::with_finest(Size3::new_2d(64, 64), 5, 2);
//! // ... assemble system.a.levels[*] and system.b.levels[0] ...
//!
//! let mut solver = FdmMgpcgSolver::new(config);
//! let solution = solver.solve_mg(&mut system)?;
//! println!("{} iterations, residual {:.3e}", solution.iterations, solution.residual);
//! ```

pub mod blas;
pub mod error;
pub mod grid;
pub mod iterative;
pub mod multigrid;
pub mod parallel;
pub mod preconditioners;
pub mod smoothers;
pub mod solvers;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use error::FdmError;
pub use grid::{FdmLinearSystem, FdmMatrix, FdmMatrixRow, FdmVector, Size3};
pub use traits::{
    FdmLinearSystemSolver, FdmMgLinearSystemSolver, FdmSolution, Preconditioner, SuccessPolicy,
};

// Re-export the CG driver and multigrid building blocks
pub use iterative::{CgBuffers, CgConfig, PcgResult, pcg};
pub use multigrid::{
    FdmMgLinearSystem, FdmMgMatrix, FdmMgVector, MgParameters, MgResult, correct, mg_v_cycle,
    restrict,
};

// Re-export preconditioners
pub use preconditioners::{
    IdentityPreconditioner, IncompleteCholeskyPreconditioner, MgPreconditioner, MgWorkspace,
};

// Re-export solvers
pub use solvers::{
    FdmCgSolver, FdmGaussSeidelSolver, FdmIccgSolver, FdmJacobiSolver, FdmMgSolver,
    FdmMgpcgSolver, GaussSeidelConfig, JacobiConfig, MgSolverConfig, MgpcgConfig,
};
