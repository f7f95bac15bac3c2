use planefix_linalg::LinalgError;

/// Reason why a point correspondence does not define a homography.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    /// The 8x8 system has no unique solution.
    #[error(transparent)]
    Singular(#[from] LinalgError),

    /// Three of the source points are collinear or coincident.
    #[error("source points {0:?} are collinear")]
    CollinearSource([usize; 3]),

    /// Three of the destination points are collinear or coincident.
    #[error("destination points {0:?} are collinear")]
    CollinearDestination([usize; 3]),

    /// The solution contains non finite coefficients.
    #[error("solution is not finite")]
    NonFinite,
}

/// An error type for the geometry module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The correspondence is degenerate and cannot be solved.
    #[error("Degenerate system: {0}")]
    DegenerateSystem(Degeneracy),

    /// A point could not be parsed from text.
    #[error("Invalid point `{0}`, expected `x,y`")]
    InvalidPoint(String),
}

impl From<LinalgError> for GeometryError {
    fn from(err: LinalgError) -> Self {
        GeometryError::DegenerateSystem(Degeneracy::Singular(err))
    }
}
