use planefix_image::{ImageError, ImageSize};

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    Image(#[from] ImageError),

    /// The image is too large for the encoder.
    #[error("Image of size {0} cannot be encoded")]
    UnsupportedImageSize(ImageSize),
}
