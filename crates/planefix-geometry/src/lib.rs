#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the geometry module.
pub mod error;

/// Homography estimation from four point correspondences.
pub mod homography;

/// 2d point type.
pub mod point;

pub use crate::error::{Degeneracy, GeometryError};
pub use crate::homography::{estimate_homography, Homography};
pub use crate::point::Point2D;
