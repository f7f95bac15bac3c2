use planefix_geometry::GeometryError;
use planefix_image::{ImageError, ImageSize};
use planefix_layout::LayoutError;

/// An error type for the imgproc module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImgprocError {
    /// The destination image would have no pixels.
    #[error("Degenerate destination size: {0}")]
    DegenerateSize(ImageSize),

    /// The corner points do not define a perspective transform.
    #[error(transparent)]
    DegenerateSystem(#[from] GeometryError),

    /// Error creating or accessing an image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The tiles could not be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A placement refers to a tile that was not provided.
    #[error("Tile index {index} is out of bounds ({len} tiles)")]
    TileIndexOutOfBounds {
        /// The requested tile.
        index: usize,
        /// Number of tiles available.
        len: usize,
    },
}
