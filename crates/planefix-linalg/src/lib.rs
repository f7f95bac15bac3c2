#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the linalg module.
pub mod error;

/// Gaussian elimination with partial pivoting.
pub mod solve;

pub use crate::error::LinalgError;
pub use crate::solve::{solve, solve_8x8, PIVOT_EPSILON};
