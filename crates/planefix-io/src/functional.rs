use std::path::Path;

use planefix_image::{ImageSize, PixelBuffer};

use crate::error::IoError;

/// Reads an image from the given file path as RGBA.
///
/// The method tries to read from any image format supported by the image
/// crate. Images without alpha get an opaque alpha channel.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGBA image containing the image data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path does not exist and
/// [`IoError::ImageDecodeError`] if the content cannot be decoded.
pub fn read_image_rgba8(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    let image = decode_image_rgba8(&bytes)?;

    log::debug!("read {} image from {}", image.size(), file_path.display());

    Ok(image)
}

/// Decodes an in-memory encoded image as RGBA.
///
/// The format is guessed from the content.
///
/// # Arguments
///
/// * `bytes` - The encoded image, e.g. the contents of a PNG file.
pub fn decode_image_rgba8(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(PixelBuffer::new(size, img.into_rgba8().into_raw())?)
}

/// Writes an RGBA image to the given file path.
///
/// The format is chosen from the file extension. Formats without an alpha
/// channel, such as JPEG, drop it.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to encode.
///
/// # Errors
///
/// Returns [`IoError::ImageDecodeError`] if the extension is unknown or the
/// encoder fails, and [`IoError::UnsupportedImageSize`] if a dimension does
/// not fit in `u32`.
pub fn write_image(file_path: impl AsRef<Path>, image: &PixelBuffer) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let (Ok(width), Ok(height)) = (u32::try_from(image.width()), u32::try_from(image.height()))
    else {
        return Err(IoError::UnsupportedImageSize(image.size()));
    };

    let buffer = image::RgbaImage::from_raw(width, height, image.as_slice().to_vec())
        .ok_or(IoError::UnsupportedImageSize(image.size()))?;

    let format = image::ImageFormat::from_path(file_path)?;
    match format {
        image::ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgba8(buffer)
                .to_rgb8()
                .save_with_format(file_path, format)?;
        }
        _ => buffer.save_with_format(file_path, format)?,
    }

    log::debug!("wrote {} image to {}", image.size(), file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Result<PixelBuffer, IoError> {
        let size = ImageSize {
            width: 5,
            height: 3,
        };
        let data = (0..5 * 3 * 4).map(|i| (i * 7 % 256) as u8).collect();
        Ok(PixelBuffer::new(size, data)?)
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_rgba8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pattern.png");

        let image = pattern()?;
        write_image(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_rgba8(&file_path)?;
        assert_eq!(image_back, image);

        let bytes = std::fs::read(&file_path)?;
        assert_eq!(decode_image_rgba8(&bytes)?, image);
        Ok(())
    }

    #[test]
    fn read_write_jpeg_drops_alpha() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("grey.jpg");

        let image = PixelBuffer::from_size_pixel(
            ImageSize {
                width: 16,
                height: 8,
            },
            [128, 128, 128, 10],
        )?;
        write_image(&file_path, &image)?;

        let image_back = read_image_rgba8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert!(image_back.as_slice().chunks_exact(4).all(|p| p[3] == 255));
        Ok(())
    }

    #[test]
    fn write_unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let res = write_image(tmp_dir.path().join("pattern.unknown"), &pattern()?);
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        let res = decode_image_rgba8(b"not an image");
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));
    }
}
