//! Grid data model: resolutions, fields, stencil matrices and linear systems

mod matrix;
mod size;
mod system;
mod vector;

pub use matrix::{FdmMatrix, FdmMatrixRow};
pub use size::Size3;
pub use system::FdmLinearSystem;
pub(crate) use system::check_size;
pub use vector::FdmVector;
