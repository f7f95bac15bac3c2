use planefix_image::Image;

/// Kernel for bilinear interpolation
///
/// Neighbours falling past the last row or column are clamped to the edge,
/// so coordinates up to and including `(cols - 1, rows - 1)` are valid.
///
/// # Arguments
///
/// * `image` - The input image container, at least 1x1.
/// * `u` - The x coordinate of the pixel to interpolate, in `[0, cols - 1]`.
/// * `v` - The y coordinate of the pixel to interpolate, in `[0, rows - 1]`.
///
/// # Returns
///
/// The interpolated value of every channel.
///
/// # Panics
///
/// If the image is empty.
pub fn bilinear_interpolation<const C: usize>(image: &Image<u8, C>, u: f64, v: f64) -> [f64; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu0 = (u.floor() as usize).min(cols - 1);
    let iv0 = (v.floor() as usize).min(rows - 1);

    let frac_u = u - iu0 as f64;
    let frac_v = v - iv0 as f64;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [0.0; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        *out = f64::from(p00[k]) * w00
            + f64::from(p01[k]) * w01
            + f64::from(p10[k]) * w10
            + f64::from(p11[k]) * w11;
    }

    pixel
}
