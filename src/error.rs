use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by import and export of compositions
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("Please select between {min} and {max} images ({count} selected)")]
    ImportCount {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Cannot load {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("No image to export.")]
    EmptyComposition,

    #[error("The canvas is empty.")]
    EmptyRegion,

    #[error("The composition is too large to export ({width}x{height})")]
    RegionTooLarge { width: u32, height: u32 },

    #[error("Error while saving the image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type ComposerResult<T> = Result<T, ComposerError>;
