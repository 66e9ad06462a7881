//! Error types for the voxsketch crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Grid error: {0}")]
    Grid(String),

    #[error("Config error: {0}")]
    Config(String),
}
