use planefix_geometry::{estimate_homography, Point2D};
use planefix_image::{ImageSize, PixelBuffer};

use super::warp_perspective;
use crate::{error::ImgprocError, parallel::ExecutionStrategy};

/// Compute the size of the rectified image for a quadrilateral.
///
/// The corners are ordered top-left, top-right, bottom-right, bottom-left.
/// The width is the longer of the top and bottom edges and the height the
/// longer of the left and right edges, both rounded down to whole pixels.
///
/// # Errors
///
/// Returns [`ImgprocError::DegenerateSize`] if a corner is not finite or the
/// resulting width or height is zero.
///
/// # Example
///
/// ```
/// use planefix_geometry::Point2D;
/// use planefix_imgproc::warp::rectified_size;
///
/// let corners = [
///     Point2D::new(10.0, 10.0),
///     Point2D::new(110.0, 10.0),
///     Point2D::new(110.0, 60.5),
///     Point2D::new(10.0, 60.5),
/// ];
/// let size = rectified_size(&corners).unwrap();
///
/// assert_eq!((size.width, size.height), (100, 50));
/// ```
pub fn rectified_size(corners: &[Point2D; 4]) -> Result<ImageSize, ImgprocError> {
    if !corners.iter().all(Point2D::is_finite) {
        return Err(ImgprocError::DegenerateSize(ImageSize {
            width: 0,
            height: 0,
        }));
    }

    let [tl, tr, br, bl] = corners;
    let width = tl.distance(tr).max(bl.distance(br)).floor();
    let height = tl.distance(bl).max(tr.distance(br)).floor();

    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    if size.is_empty() {
        return Err(ImgprocError::DegenerateSize(size));
    }

    Ok(size)
}

/// Rectify the quadrilateral of `source` bounded by `corners` into an
/// axis-aligned image.
///
/// Uses [`ExecutionStrategy::Serial`]; see [`rectify_with`].
///
/// # Errors
///
/// - [`ImgprocError::DegenerateSize`] if the quadrilateral has a zero-length side.
/// - [`ImgprocError::DegenerateSystem`] if the corners do not define a
///   perspective transform, for example when three of them are collinear.
pub fn rectify(source: &PixelBuffer, corners: &[Point2D; 4]) -> Result<PixelBuffer, ImgprocError> {
    rectify_with(source, corners, ExecutionStrategy::Serial)
}

/// Rectify a quadrilateral with the given execution strategy.
///
/// The destination corners are `(0, 0)`, `(w, 0)`, `(w, h)` and `(0, h)` where
/// `w x h` is [`rectified_size`]. The homography is solved from destination to
/// source so that every output pixel is sampled from the input.
pub fn rectify_with(
    source: &PixelBuffer,
    corners: &[Point2D; 4],
    strategy: ExecutionStrategy,
) -> Result<PixelBuffer, ImgprocError> {
    let size = rectified_size(corners)?;
    let (w, h) = (size.width as f64, size.height as f64);

    let rect = [
        Point2D::new(0.0, 0.0),
        Point2D::new(w, 0.0),
        Point2D::new(w, h),
        Point2D::new(0.0, h),
    ];
    let m = estimate_homography(corners, &rect)?;

    log::debug!(
        "rectifying {} source into {} ({:?})",
        source.size(),
        size,
        strategy
    );

    let mut dst = PixelBuffer::from_size_val(size, 0)?;
    warp_perspective(source, &mut dst, &m, strategy)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planefix_geometry::{Degeneracy, GeometryError};
    use planefix_image::Image;

    fn checkerboard(width: usize, height: usize) -> Result<PixelBuffer, ImgprocError> {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let v = if (x / 4 + y / 4) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, 255 - v, (x % 256) as u8, 128]);
            }
        }
        Ok(Image::new(ImageSize { width, height }, data)?)
    }

    #[test]
    fn rectified_size_takes_longest_edges() -> Result<(), ImgprocError> {
        let corners = [
            Point2D::new(0.0, 0.0),
            Point2D::new(30.0, 0.0),
            Point2D::new(40.0, 20.0),
            Point2D::new(0.0, 20.9),
        ];
        let size = rectified_size(&corners)?;
        assert_eq!(size.width, 40);
        assert_eq!(size.height, 22);
        Ok(())
    }

    #[test]
    fn rectified_size_degenerate() {
        let p = Point2D::new(5.0, 5.0);
        assert!(matches!(
            rectified_size(&[p; 4]),
            Err(ImgprocError::DegenerateSize(_))
        ));

        let corners = [
            Point2D::new(0.0, 0.0),
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];
        assert!(matches!(
            rectified_size(&corners),
            Err(ImgprocError::DegenerateSize(_))
        ));
    }

    #[test]
    fn rectify_axis_aligned_crop() -> Result<(), ImgprocError> {
        let src = checkerboard(32, 24)?;
        let corners = [
            Point2D::new(4.0, 8.0),
            Point2D::new(20.0, 8.0),
            Point2D::new(20.0, 16.0),
            Point2D::new(4.0, 16.0),
        ];

        let out = rectify(&src, &corners)?;
        assert_eq!(out.size(), ImageSize { width: 16, height: 8 });

        // a pure translation samples source pixels exactly
        for y in 0..8 {
            for x in 0..16 {
                let s = src.pixel(x + 4, y + 8).ok_or(ImgprocError::DegenerateSize(src.size()))?;
                assert_eq!(out.pixel(x, y), Some(&[s[0], s[1], s[2], 255][..]));
            }
        }
        Ok(())
    }

    #[test]
    fn rectify_collinear_corners() -> Result<(), ImgprocError> {
        let src = checkerboard(16, 16)?;
        let corners = [
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 5.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];

        let res = rectify(&src, &corners);
        assert!(matches!(
            res,
            Err(ImgprocError::DegenerateSystem(GeometryError::DegenerateSystem(
                Degeneracy::CollinearSource(_)
            )))
        ));
        Ok(())
    }

    #[test]
    fn rectify_strategies_agree() -> Result<(), ImgprocError> {
        let src = checkerboard(64, 48)?;
        let corners = [
            Point2D::new(6.5, 3.0),
            Point2D::new(58.0, 9.25),
            Point2D::new(52.0, 44.0),
            Point2D::new(2.0, 40.0),
        ];

        let serial = rectify_with(&src, &corners, ExecutionStrategy::Serial)?;
        let parallel = rectify_with(&src, &corners, ExecutionStrategy::ParallelRows)?;
        assert_eq!(serial, parallel);
        Ok(())
    }
}
