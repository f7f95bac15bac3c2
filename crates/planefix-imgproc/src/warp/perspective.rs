use planefix_geometry::{Homography, Point2D};
use planefix_image::PixelBuffer;

use crate::{
    error::ImgprocError,
    interpolation::{bilinear_interpolation, channel_from_f64},
    parallel::{self, ExecutionStrategy},
};

/// Value written to destination pixels that map outside the source.
const OUTSIDE: [u8; 4] = [0, 0, 0, 0];

/// Map a destination pixel into source coordinates.
///
/// Returns `None` when the mapped point is not finite or does not leave room
/// for the four bilinear neighbours, i.e. outside `[0, cols - 1) x [0, rows - 1)`.
fn source_coordinates(m: &Homography, x: usize, y: usize, cols: usize, rows: usize) -> Option<Point2D> {
    let p = m.transform_point(Point2D::new(x as f64, y as f64))?;
    let (u_max, v_max) = (cols.saturating_sub(1) as f64, rows.saturating_sub(1) as f64);
    (p.is_finite() && p.x >= 0.0 && p.x < u_max && p.y >= 0.0 && p.y < v_max).then_some(p)
}

/// Applies a perspective transformation to an RGBA image by inverse mapping.
///
/// `m` maps destination coordinates to source coordinates. Every destination
/// pixel is written: sampled pixels receive the bilinear interpolation of the
/// source colour channels with alpha 255, pixels that map outside the source
/// are set to `[0, 0, 0, 0]`. The source alpha channel is ignored.
///
/// * `src` - The input image.
/// * `dst` - The pre-allocated output image; its size sets the output size.
/// * `m` - The 3x3 perspective transformation matrix dst -> src.
/// * `strategy` - How destination rows are scheduled.
///
/// # Errors
///
/// Returns [`ImgprocError::DegenerateSize`] if `dst` has no pixels.
///
/// # Example
///
/// ```
/// use planefix_geometry::Homography;
/// use planefix_image::{Image, ImageSize};
/// use planefix_imgproc::parallel::ExecutionStrategy;
/// use planefix_imgproc::warp::warp_perspective;
///
/// let src = Image::<u8, 4>::from_size_pixel(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     [10, 20, 30, 0],
/// )
/// .unwrap();
///
/// let mut dst = Image::<u8, 4>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     0,
/// )
/// .unwrap();
///
/// warp_perspective(&src, &mut dst, &Homography::identity(), ExecutionStrategy::Serial).unwrap();
///
/// assert_eq!(dst.pixel(1, 2), Some(&[10u8, 20, 30, 255][..]));
/// ```
pub fn warp_perspective(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    m: &Homography,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    if dst.size().is_empty() {
        return Err(ImgprocError::DegenerateSize(dst.size()));
    }

    let (cols, rows) = (src.cols(), src.rows());

    parallel::for_each_pixel(dst, strategy, |x, y, dst_pixel| {
        let value = match source_coordinates(m, x, y, cols, rows) {
            Some(p) => {
                let [r, g, b, _] = bilinear_interpolation(src, p.x, p.y);
                [
                    channel_from_f64(r),
                    channel_from_f64(g),
                    channel_from_f64(b),
                    u8::MAX,
                ]
            }
            None => OUTSIDE,
        };
        dst_pixel.copy_from_slice(&value);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planefix_image::{Image, ImageSize};

    /// A 4x3 image where every pixel encodes its position.
    fn gradient() -> Result<PixelBuffer, ImgprocError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let mut data = Vec::with_capacity(4 * 3 * 4);
        for y in 0..3u8 {
            for x in 0..4u8 {
                data.extend_from_slice(&[x * 10, y * 10, 100 + x + y, 7]);
            }
        }
        Ok(Image::new(size, data)?)
    }

    fn blank(width: usize, height: usize) -> Result<PixelBuffer, ImgprocError> {
        Ok(Image::from_size_pixel(
            ImageSize { width, height },
            [9, 9, 9, 9],
        )?)
    }

    #[test]
    fn warp_perspective_identity() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let mut dst = blank(4, 3)?;

        warp_perspective(&src, &mut dst, &Homography::identity(), ExecutionStrategy::Serial)?;

        // interior pixels copied exactly, alpha forced to 255
        for y in 0..2 {
            for x in 0..3 {
                let expected = src.pixel(x, y).map(|p| [p[0], p[1], p[2], 255]);
                assert_eq!(dst.pixel(x, y), expected.as_ref().map(|p| &p[..]));
            }
        }

        // last row and column have no right/bottom neighbour
        assert_eq!(dst.pixel(3, 0), Some(&OUTSIDE[..]));
        assert_eq!(dst.pixel(0, 2), Some(&OUTSIDE[..]));
        Ok(())
    }

    #[test]
    fn warp_perspective_translation() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let mut dst = blank(2, 2)?;

        let shift = Homography::from_coefficients([1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0])
            .ok_or(ImgprocError::DegenerateSize(dst.size()))?;
        warp_perspective(&src, &mut dst, &shift, ExecutionStrategy::Serial)?;

        assert_eq!(dst.pixel(0, 0), Some(&[10u8, 10, 102, 255][..]));
        assert_eq!(dst.pixel(1, 0), Some(&[20u8, 10, 103, 255][..]));
        assert_eq!(dst.pixel(0, 1), Some(&OUTSIDE[..]));
        Ok(())
    }

    #[test]
    fn warp_perspective_half_pixel() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let mut dst = blank(1, 1)?;

        let half = Homography::from_coefficients([1.0, 0.0, 0.5, 0.0, 1.0, 0.5, 0.0, 0.0, 1.0])
            .ok_or(ImgprocError::DegenerateSize(dst.size()))?;
        warp_perspective(&src, &mut dst, &half, ExecutionStrategy::Serial)?;

        // mean of (0,0), (10,0), (0,10), (10,10) and blue 100, 101, 101, 102
        assert_eq!(dst.pixel(0, 0), Some(&[5u8, 5, 101, 255][..]));
        Ok(())
    }

    #[test]
    fn warp_perspective_outside() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let mut dst = blank(3, 3)?;

        let far = Homography::from_coefficients([1.0, 0.0, -100.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
            .ok_or(ImgprocError::DegenerateSize(dst.size()))?;
        warp_perspective(&src, &mut dst, &far, ExecutionStrategy::Serial)?;

        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn warp_perspective_tiny_source() -> Result<(), ImgprocError> {
        let src = blank(1, 1)?;
        let mut dst = blank(2, 2)?;

        warp_perspective(&src, &mut dst, &Homography::identity(), ExecutionStrategy::Serial)?;

        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn warp_perspective_empty_destination() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let mut dst = blank(0, 4)?;

        let res = warp_perspective(&src, &mut dst, &Homography::identity(), ExecutionStrategy::Serial);
        assert_eq!(res, Err(ImgprocError::DegenerateSize(dst.size())));
        Ok(())
    }

    #[test]
    fn warp_perspective_strategies_agree() -> Result<(), ImgprocError> {
        let src = gradient()?;
        let m = Homography::from_coefficients([0.7, 0.1, 0.2, -0.05, 0.8, 0.1, 0.01, 0.02, 1.0])
            .ok_or(ImgprocError::DegenerateSize(src.size()))?;

        let mut serial = blank(6, 5)?;
        let mut parallel = blank(6, 5)?;
        warp_perspective(&src, &mut serial, &m, ExecutionStrategy::Serial)?;
        warp_perspective(&src, &mut parallel, &m, ExecutionStrategy::ParallelRows)?;

        assert_eq!(serial, parallel);
        Ok(())
    }
}
