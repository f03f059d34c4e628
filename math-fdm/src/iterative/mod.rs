//! Krylov solvers for stencil systems
//!
//! - [`pcg`]: preconditioned Conjugate Gradient for symmetric positive
//!   (semi-)definite stencil systems, generic over the
//!   [`Preconditioner`](crate::traits::Preconditioner)

mod cg;

pub use cg::{CgBuffers, CgConfig, PcgResult, pcg};
