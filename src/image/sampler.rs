//! Nearest-neighbor image resampling

use image::{Rgba, RgbaImage};

/// Resample `src` to `width` x `height` with point sampling, no interpolation.
///
/// Destination pixel (x, y) reads the source pixel at the truncated
/// proportional position, so integer downscale ratios pick exact source
/// pixels. An empty source yields a fully transparent buffer.
pub fn sample_nearest(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let ratio_x = src.width() as f32 / width as f32;
    let ratio_y = src.height() as f32 / height as f32;
    for y in 0..height {
        let sy = ((y as f32 * ratio_y) as u32).min(src.height() - 1);
        for x in 0..width {
            let sx = ((x as f32 * ratio_x) as u32).min(src.width() - 1);
            out.put_pixel(x, y, *src.get_pixel(sx, sy));
        }
    }
    out
}

/// Fit `src` onto a `side` x `side` canvas filled with `border`, preserving
/// aspect ratio with point resampling.
///
/// Square images are resampled directly. Non-square images are scaled so
/// their long edge matches `side`, anchored at the left and bottom of the
/// canvas. Used to normalize reference images for the downstream pipeline.
pub fn pad_to_square(src: &RgbaImage, side: u32, border: Rgba<u8>) -> RgbaImage {
    if src.width() == src.height() {
        return sample_nearest(src, side, side);
    }

    let mut out = RgbaImage::from_pixel(side, side, border);
    let scaled = if src.width() > src.height() {
        let ratio = src.height() as f32 / src.width() as f32;
        sample_nearest(src, side, (side as f32 * ratio).round() as u32)
    } else {
        let ratio = src.width() as f32 / src.height() as f32;
        sample_nearest(src, (side as f32 * ratio).round() as u32, side)
    };

    let y_offset = side - scaled.height();
    for j in 0..scaled.height() {
        for i in 0..scaled.width() {
            out.put_pixel(i, y_offset + j, *scaled.get_pixel(i, j));
        }
    }
    out
}
