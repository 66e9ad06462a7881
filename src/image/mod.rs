//! Pixel sampling and classification for image-driven structure inference

pub mod classify;
pub mod sampler;

pub use classify::{classify, grayscale, saturation, PixelClass};
pub use sampler::{pad_to_square, sample_nearest};
