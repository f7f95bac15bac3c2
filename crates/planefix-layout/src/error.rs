/// An error type for the layout module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The layout configuration is not usable.
    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    /// An item has a non-positive or non-finite aspect ratio.
    #[error("Invalid aspect ratio {aspect_ratio} for item {index}")]
    InvalidItem {
        /// Position of the item in the input sequence.
        index: usize,
        /// The offending aspect ratio.
        aspect_ratio: f64,
    },
}
