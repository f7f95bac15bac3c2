//! Perspective rectification and justified mosaic layout.
//!
//! - [`geometry`] estimates the homography between two quadrilaterals.
//! - [`imgproc`] resamples images through it and composes mosaics.
//! - [`layout`] packs images into justified rows.
//! - [`io`] reads and writes images.

#[doc(inline)]
pub use planefix_linalg as linalg;

#[doc(inline)]
pub use planefix_geometry as geometry;

#[doc(inline)]
pub use planefix_image as image;

#[doc(inline)]
pub use planefix_imgproc as imgproc;

#[doc(inline)]
pub use planefix_io as io;

#[doc(inline)]
pub use planefix_layout as layout;
