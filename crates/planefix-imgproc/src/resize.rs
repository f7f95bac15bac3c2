use planefix_image::Image;

use crate::{
    error::ImgprocError,
    interpolation::{bilinear_interpolation, channel_from_f64},
    parallel::{self, ExecutionStrategy},
};

/// Evenly spaced sample positions from `0` to `last`, inclusive.
///
/// A single sample sits at `0`.
fn linspace_step(last: usize, num: usize) -> f64 {
    if num > 1 {
        last as f64 / (num - 1) as f64
    } else {
        0.0
    }
}

/// Resize an image to the size of `dst` using bilinear interpolation.
///
/// The sampling grid is corner-aligned: the first and last destination
/// columns sample the first and last source columns, and likewise for rows.
/// All channels, alpha included, are interpolated.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, pre-allocated with the new size.
///
/// # Errors
///
/// Returns [`ImgprocError::DegenerateSize`] if either image has no pixels.
///
/// # Example
///
/// ```
/// use planefix_image::{Image, ImageSize};
/// use planefix_imgproc::resize::resize_bilinear;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0, 100],
/// )
/// .unwrap();
///
/// let mut resized = Image::<u8, 1>::from_size_val(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     0,
/// )
/// .unwrap();
///
/// resize_bilinear(&image, &mut resized).unwrap();
///
/// assert_eq!(resized.as_slice(), &[0, 50, 100, 0, 50, 100]);
/// ```
pub fn resize_bilinear<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImgprocError> {
    if src.size().is_empty() {
        return Err(ImgprocError::DegenerateSize(src.size()));
    }
    if dst.size().is_empty() {
        return Err(ImgprocError::DegenerateSize(dst.size()));
    }

    let step_x = linspace_step(src.cols() - 1, dst.cols());
    let step_y = linspace_step(src.rows() - 1, dst.rows());

    parallel::for_each_pixel(dst, ExecutionStrategy::Serial, |x, y, dst_pixel| {
        let value = bilinear_interpolation(src, x as f64 * step_x, y as f64 * step_y);
        dst_pixel
            .iter_mut()
            .zip(value)
            .for_each(|(out, v)| *out = channel_from_f64(v));
    });

    Ok(())
}
