//! Composition of justified row layouts into a single image.

use planefix_image::{ImageSize, PixelBuffer};
use planefix_layout::{canvas_height, layout_rows, LayoutConfig, LayoutItem, PlacementRect};

use crate::{error::ImgprocError, resize::resize_bilinear};

/// Round a layout coordinate to whole pixels, clamping negatives to zero.
fn to_pixels(v: f64) -> usize {
    v.round().max(0.0) as usize
}

/// Copy `tile` into `canvas` with its top-left corner at `(ox, oy)`.
///
/// Rows and columns falling outside the canvas are dropped.
fn blit(canvas: &mut PixelBuffer, tile: &PixelBuffer, ox: usize, oy: usize) {
    let (canvas_cols, canvas_rows) = (canvas.cols(), canvas.rows());
    if ox >= canvas_cols || oy >= canvas_rows {
        return;
    }

    let cols = tile.cols().min(canvas_cols - ox);
    let rows = tile.rows().min(canvas_rows - oy);
    let (tile_stride, canvas_stride) = (tile.cols() * 4, canvas_cols * 4);

    let src = tile.as_slice();
    let dst = canvas.as_slice_mut();
    for y in 0..rows {
        let src_offset = y * tile_stride;
        let dst_offset = (oy + y) * canvas_stride + ox * 4;
        dst[dst_offset..dst_offset + cols * 4]
            .copy_from_slice(&src[src_offset..src_offset + cols * 4]);
    }
}

/// Draw tiles onto a canvas at the given placements.
///
/// The canvas is filled with `background`, then each placement is drawn in
/// order: the referenced tile is resized to the rounded placement size and
/// copied at the rounded placement position, clipped to the canvas. Later
/// placements overwrite earlier ones where they overlap.
///
/// # Arguments
///
/// * `tiles` - The images referenced by `PlacementRect::item`.
/// * `placements` - Where to draw each tile, as produced by [`layout_rows`].
/// * `canvas` - The size of the output image.
/// * `background` - The RGBA colour of uncovered pixels.
///
/// # Errors
///
/// - [`ImgprocError::TileIndexOutOfBounds`] if a placement names a missing tile.
/// - [`ImgprocError::DegenerateSize`] if a referenced tile is empty.
/// - [`ImgprocError::Image`] if the canvas is too large to allocate.
pub fn compose_mosaic(
    tiles: &[PixelBuffer],
    placements: &[PlacementRect<usize>],
    canvas: ImageSize,
    background: [u8; 4],
) -> Result<PixelBuffer, ImgprocError> {
    let mut out = PixelBuffer::from_size_pixel(canvas, background)?;

    for placement in placements {
        let tile = tiles
            .get(placement.item)
            .ok_or(ImgprocError::TileIndexOutOfBounds {
                index: placement.item,
                len: tiles.len(),
            })?;

        let size = ImageSize {
            width: to_pixels(placement.width),
            height: to_pixels(placement.height),
        };
        if size.is_empty() {
            continue;
        }

        let mut resized = PixelBuffer::from_size_val(size, 0)?;
        resize_bilinear(tile, &mut resized)?;
        blit(
            &mut out,
            &resized,
            to_pixels(placement.x),
            to_pixels(placement.y),
        );
    }

    log::debug!(
        "composed {} placements onto a {} canvas",
        placements.len(),
        canvas
    );

    Ok(out)
}

/// Lay out `tiles` in justified rows and compose them into one image.
///
/// The canvas is `config.canvas_size` pixels wide and as tall as the rows
/// need, rounded up.
///
/// # Errors
///
/// - [`ImgprocError::Layout`] if the configuration is invalid.
/// - [`ImgprocError::DegenerateSize`] if a tile has no pixels.
pub fn layout_mosaic(
    tiles: &[PixelBuffer],
    config: &LayoutConfig,
    background: [u8; 4],
) -> Result<PixelBuffer, ImgprocError> {
    let items = tiles
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            LayoutItem::from_size(tile.width(), tile.height(), i)
                .ok_or(ImgprocError::DegenerateSize(tile.size()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let placements = layout_rows(&items, config)?;
    let canvas = ImageSize {
        width: config.canvas_size as usize,
        height: canvas_height(&placements, config.gap).ceil() as usize,
    };

    compose_mosaic(tiles, &placements, canvas, background)
}
