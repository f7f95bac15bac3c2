use planefix_linalg::solve_8x8;

use crate::error::{Degeneracy, GeometryError};
use crate::point::Point2D;

/// Sine of the angle under which three points count as collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Smallest homogeneous denominator accepted when mapping a point.
const DENOM_EPSILON: f64 = 1e-12;

/// A 3x3 projective transform with the bottom-right coefficient fixed to 1.
///
/// The coefficients are stored row-major:
///
/// ```text
/// | h0 h1 h2 |
/// | h3 h4 h5 |
/// | h6 h7  1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    m: [f64; 9],
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Build a homography from 9 row-major coefficients.
    ///
    /// The matrix is rescaled so that the bottom-right coefficient is 1.
    /// Returns `None` if that coefficient is zero or any coefficient is not finite.
    pub fn from_coefficients(m: [f64; 9]) -> Option<Self> {
        if !m.iter().all(|v| v.is_finite()) || m[8].abs() < DENOM_EPSILON {
            return None;
        }
        let scale = 1.0 / m[8];
        let mut m = m.map(|v| v * scale);
        m[8] = 1.0;
        Some(Self { m })
    }

    /// The 9 row-major coefficients, `h8` being 1.
    pub fn coefficients(&self) -> &[f64; 9] {
        &self.m
    }

    /// The coefficients as a 3x3 matrix.
    pub fn to_mat33(&self) -> [[f64; 3]; 3] {
        let m = &self.m;
        [[m[0], m[1], m[2]], [m[3], m[4], m[5]], [m[6], m[7], m[8]]]
    }

    /// Map a point through the transform.
    ///
    /// Returns `None` when the point maps to infinity.
    ///
    /// # Example
    ///
    /// ```
    /// use planefix_geometry::{Homography, Point2D};
    ///
    /// let h = Homography::from_coefficients([1.0, 0.0, 5.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0]).unwrap();
    /// let p = h.transform_point(Point2D::new(1.0, 1.0)).unwrap();
    ///
    /// assert_eq!(p, Point2D::new(6.0, -1.0));
    /// ```
    pub fn transform_point(&self, p: Point2D) -> Option<Point2D> {
        let m = &self.m;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        if w.abs() < DENOM_EPSILON {
            return None;
        }
        let x = (m[0] * p.x + m[1] * p.y + m[2]) / w;
        let y = (m[3] * p.x + m[4] * p.y + m[5]) / w;
        Some(Point2D::new(x, y))
    }

    /// The determinant of the 3x3 matrix.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[5] * m[7]) -
        m[1] * (m[3] * m[8] - m[5] * m[6]) +
        m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// The inverse transform.
    ///
    /// Returns `None` if the matrix is singular or its inverse cannot be
    /// normalised to a unit bottom-right coefficient.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < DENOM_EPSILON || !det.is_finite() {
            return None;
        }

        let m = &self.m;
        #[rustfmt::skip]
        let adj = [
            m[4] * m[8] - m[5] * m[7],  // [0, 0]
            m[2] * m[7] - m[1] * m[8],  // [0, 1]
            m[1] * m[5] - m[2] * m[4],  // [0, 2]
            m[5] * m[6] - m[3] * m[8],  // [1, 0]
            m[0] * m[8] - m[2] * m[6],  // [1, 1]
            m[2] * m[3] - m[0] * m[5],  // [1, 2]
            m[3] * m[7] - m[4] * m[6],  // [2, 0]
            m[1] * m[6] - m[0] * m[7],  // [2, 1]
            m[0] * m[4] - m[1] * m[3],  // [2, 2]
        ];

        Self::from_coefficients(adj.map(|v| v / det))
    }
}

fn find_collinear(points: &[Point2D; 4]) -> Option<[usize; 3]> {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.into_iter().find(|&[i, j, k]| {
        let (a, b, c) = (points[i], points[j], points[k]);
        let (abx, aby) = (b.x - a.x, b.y - a.y);
        let (acx, acy) = (c.x - a.x, c.y - a.y);
        let cross = abx * acy - aby * acx;
        let norm = abx.hypot(aby) * acx.hypot(acy);
        // a zero norm means two points coincide
        cross.is_nan() || cross.abs() <= COLLINEAR_EPSILON * norm
    })
}

/// Compute the homography mapping each destination point onto its source point.
///
/// The transform goes from destination to source so that a resampler can
/// iterate over destination pixels and look up where to read in the source.
///
/// For each correspondence two rows of an 8x8 system are emitted:
///
/// ```text
/// [dx, dy, 1, 0, 0, 0, -sx*dx, -sx*dy] . h = sx
/// [0, 0, 0, dx, dy, 1, -sy*dx, -sy*dy] . h = sy
/// ```
///
/// and `h8` is fixed to 1.
///
/// # Arguments
///
/// * `src` - Four points in source-image space.
/// * `dst` - Four points in destination-image space, matched by index.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateSystem`] if three points of either set
/// are collinear or coincident, or if the linear system is singular.
///
/// # Example
///
/// ```
/// use planefix_geometry::{estimate_homography, Point2D};
///
/// let square = [
///     Point2D::new(0.0, 0.0),
///     Point2D::new(1.0, 0.0),
///     Point2D::new(1.0, 1.0),
///     Point2D::new(0.0, 1.0),
/// ];
/// let h = estimate_homography(&square, &square).unwrap();
///
/// assert!((h.coefficients()[0] - 1.0).abs() < 1e-12);
/// assert!(h.coefficients()[1].abs() < 1e-12);
/// ```
pub fn estimate_homography(
    src: &[Point2D; 4],
    dst: &[Point2D; 4],
) -> Result<Homography, GeometryError> {
    if let Some(triple) = find_collinear(src) {
        return Err(GeometryError::DegenerateSystem(
            Degeneracy::CollinearSource(triple),
        ));
    }
    if let Some(triple) = find_collinear(dst) {
        return Err(GeometryError::DegenerateSystem(
            Degeneracy::CollinearDestination(triple),
        ));
    }

    // construct the system A h = b
    let mut a = [[0.0; 8]; 8];
    let mut b = [0.0; 8];
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        a[2 * i] = [d.x, d.y, 1.0, 0.0, 0.0, 0.0, -s.x * d.x, -s.x * d.y];
        b[2 * i] = s.x;
        a[2 * i + 1] = [0.0, 0.0, 0.0, d.x, d.y, 1.0, -s.y * d.x, -s.y * d.y];
        b[2 * i + 1] = s.y;
    }

    let h = solve_8x8(a, b)?;
    if !h.iter().all(|v| v.is_finite()) {
        return Err(GeometryError::DegenerateSystem(Degeneracy::NonFinite));
    }

    let homography = Homography {
        m: [h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0],
    };
    log::debug!("estimated homography {:?}", homography.m);

    Ok(homography)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> [Point2D; 4] {
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ]
    }

    fn assert_maps(h: &Homography, from: &[Point2D; 4], to: &[Point2D; 4]) {
        for (f, t) in from.iter().zip(to.iter()) {
            let p = h.transform_point(*f).expect("finite mapping");
            assert_relative_eq!(p.x, t.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, t.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn homography_identity() -> Result<(), GeometryError> {
        let square = unit_square();
        let h = estimate_homography(&square, &square)?;
        let expected = Homography::identity();

        for (v, e) in h.coefficients().iter().zip(expected.coefficients()) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn homography_translation() -> Result<(), GeometryError> {
        let dst = unit_square();
        let src = dst.map(|p| Point2D::new(p.x + 3.0, p.y - 2.0));
        let h = estimate_homography(&src, &dst)?;

        let expected = [1.0, 0.0, 3.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0];
        for (v, e) in h.coefficients().iter().zip(expected.iter()) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn homography_maps_destination_to_source() -> Result<(), GeometryError> {
        let src = [
            Point2D::new(10.0, 20.0),
            Point2D::new(90.0, 5.0),
            Point2D::new(110.0, 70.0),
            Point2D::new(0.0, 60.0),
        ];
        let dst = [
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(100.0, 50.0),
            Point2D::new(0.0, 50.0),
        ];
        let h = estimate_homography(&src, &dst)?;

        // a true perspective, not an affine
        assert!(h.coefficients()[6].abs() > 1e-6 || h.coefficients()[7].abs() > 1e-6);
        assert_maps(&h, &dst, &src);

        let inv = h.inverse().expect("invertible");
        assert_maps(&inv, &src, &dst);

        // swapping the arguments yields the forward mapping directly
        let forward = estimate_homography(&dst, &src)?;
        for (v, e) in forward.coefficients().iter().zip(inv.coefficients()) {
            assert_relative_eq!(v, e, epsilon = 1e-9, max_relative = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn homography_collinear_source() {
        let src = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(20.0, 20.0),
            Point2D::new(0.0, 30.0),
        ];
        let dst = [
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(100.0, 50.0),
            Point2D::new(0.0, 50.0),
        ];
        assert_eq!(
            estimate_homography(&src, &dst),
            Err(GeometryError::DegenerateSystem(
                Degeneracy::CollinearSource([0, 1, 2])
            ))
        );
        assert_eq!(
            estimate_homography(&dst, &src),
            Err(GeometryError::DegenerateSystem(
                Degeneracy::CollinearDestination([0, 1, 2])
            ))
        );
    }

    #[test]
    fn homography_coincident_points() {
        let mut src = unit_square();
        src[3] = src[2];
        let res = estimate_homography(&src, &unit_square());
        assert!(matches!(res, Err(GeometryError::DegenerateSystem(_))));
    }

    #[test]
    fn homography_transform_point_at_infinity() {
        let h = Homography::from_coefficients([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0])
            .expect("valid coefficients");
        assert_eq!(h.transform_point(Point2D::new(-1.0, 3.0)), None);
        assert_eq!(
            h.transform_point(Point2D::new(1.0, 4.0)),
            Some(Point2D::new(0.5, 2.0))
        );
    }

    #[test]
    fn homography_from_coefficients_normalises() {
        let h = Homography::from_coefficients([2.0, 0.0, 4.0, 0.0, 2.0, 6.0, 0.0, 0.0, 2.0])
            .expect("valid coefficients");
        assert_eq!(
            h.coefficients(),
            &[1.0, 0.0, 2.0, 0.0, 1.0, 3.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(
            Homography::from_coefficients([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
            None
        );
        assert_eq!(h.to_mat33()[1], [0.0, 1.0, 3.0]);
    }
}
