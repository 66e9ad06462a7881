//! Pixel classification for structure inference
//!
//! A reference image encodes structure as reddish strokes whose darkness must
//! pass a sensitivity gate and whose HSV saturation encodes height, and solid
//! blocks as fully opaque black pixels. Everything else is background.

use image::Rgba;

/// Classification of a single resampled pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PixelClass {
    /// Reddish and dark enough: place a structure cell whose height is driven
    /// by the pixel's HSV saturation
    Structure { saturation: f32 },
    /// Fully opaque black: fill the whole column
    Solid,
    /// Leave the column untouched
    Background,
}

/// Perceptual grayscale luminance in 0..1 (Rec. 601 weights)
pub fn grayscale(pixel: Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// HSV saturation in 0..1; zero for pure black
pub fn saturation(pixel: Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    let max = r.max(g).max(b);
    if max == 0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    (max - min) as f32 / max as f32
}

/// Classify a pixel against the structure rules.
///
/// A pixel is a structure sample when its red channel strictly exceeds both
/// green and blue and its grayscale value is strictly below `sensitivity`.
/// Otherwise a fully opaque black pixel is a solid column marker.
pub fn classify(pixel: Rgba<u8>, sensitivity: f32) -> PixelClass {
    let [r, g, b, a] = pixel.0;
    if r > g && r > b && grayscale(pixel) < sensitivity {
        PixelClass::Structure { saturation: saturation(pixel) }
    } else if r == 0 && g == 0 && b == 0 && a == 255 {
        PixelClass::Solid
    } else {
        PixelClass::Background
    }
}
