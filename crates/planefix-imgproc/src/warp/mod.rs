//! Perspective rectification of RGBA images.
//!
//! - [`warp_perspective`] resamples an image through a destination to source
//!   homography into a pre-allocated buffer.
//! - [`rectify`] maps an arbitrary quadrilateral of an image onto an upright
//!   rectangle, sizing the output from the quadrilateral's edges.
//!
//! # Examples
//!
//! Straightening a photographed document:
//!
//! ```no_run
//! use planefix_geometry::Point2D;
//! use planefix_image::{Image, ImageSize};
//! use planefix_imgproc::warp::rectify;
//!
//! let photo = Image::<u8, 4>::from_size_val(ImageSize { width: 640, height: 480 }, 0).unwrap();
//! let corners = [
//!     Point2D::new(102.0, 51.0),
//!     Point2D::new(540.0, 80.0),
//!     Point2D::new(560.0, 430.0),
//!     Point2D::new(85.0, 400.0),
//! ];
//! let page = rectify(&photo, &corners).unwrap();
//! ```

mod perspective;
mod rectify;

pub use perspective::warp_perspective;
pub use rectify::{rectified_size, rectify, rectify_with};
