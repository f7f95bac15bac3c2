//! Pixel interpolation used when resampling images.
//!
//! Only bilinear interpolation is provided: the value at a fractional
//! coordinate is the weighted average of the four surrounding pixels.
//!
//! # Common Use Cases
//!
//! - Perspective rectification with `crate::warp`
//! - Tile resizing with `crate::resize`

mod bilinear;

pub use bilinear::bilinear_interpolation;

/// Convert an interpolated channel value back to `u8`.
///
/// Values are rounded to the nearest integer, half away from zero, and
/// clamped to `0..=255`.
///
/// # Example
///
/// ```
/// use planefix_imgproc::interpolation::channel_from_f64;
///
/// assert_eq!(channel_from_f64(199.9999999), 200);
/// assert_eq!(channel_from_f64(12.5), 13);
/// assert_eq!(channel_from_f64(-3.0), 0);
/// assert_eq!(channel_from_f64(300.0), 255);
/// ```
#[inline]
pub fn channel_from_f64(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}
