use std::str::FromStr;

use crate::error::GeometryError;

/// A point in a 2d pixel coordinate space.
///
/// The same type is used for source-image and destination-image coordinates;
/// functions taking points name the space each argument lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// # Example
    ///
    /// ```
    /// use planefix_geometry::Point2D;
    ///
    /// let d = Point2D::new(0.0, 0.0).distance(&Point2D::new(3.0, 4.0));
    /// assert_eq!(d, 5.0);
    /// ```
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl std::fmt::Display for Point2D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point2D {
    type Err = GeometryError;

    /// Parses `"x,y"`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeometryError::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        let p = Point2D::new(x, y);
        if !p.is_finite() {
            return Err(invalid());
        }
        Ok(p)
    }
}
