//! Error types for fieldline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldLineError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Heatmap has no pixels: {0}")]
    EmptyHeatmap(PathBuf),

    #[error("Shard {index} out of range, painter has {count} shards")]
    ShardOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, FieldLineError>;
