#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the imgproc module.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// mosaic composition module.
pub mod mosaic;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// image geometric transformations module.
pub mod warp;

pub use crate::error::ImgprocError;
