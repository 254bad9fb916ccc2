use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageError, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ComposerError, ComposerResult};
use crate::item::CanvasItem;
use crate::settings::Settings;
use crate::thumbnail::Thumbnail;

/// Extensions offered by the import dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// One decoded file of a batch
#[derive(Debug)]
pub struct LoadedImage {
    /// Position of the file in the user's selection
    pub index: usize,
    pub item: CanvasItem,
    pub thumbnail: Thumbnail,
}

/// A file of a batch that could not be used
#[derive(Debug)]
pub struct ImportFailure {
    pub name: String,
    pub error: ComposerError,
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            ComposerError::Decode { .. } => write!(f, "Import error: {}", self.error),
            other => write!(f, "Import error {}: {}", self.name, other),
        }
    }
}

/// Decoded selection, ready to replace the canvas contents
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub loaded: Vec<LoadedImage>,
    pub failures: Vec<ImportFailure>,
}

/// Rejects selections outside the allowed number of images
pub fn check_count(count: usize, settings: &Settings) -> ComposerResult<()> {
    if settings.import_range().contains(&count) {
        Ok(())
    } else {
        Err(ComposerError::ImportCount {
            count,
            min: settings.min_images,
            max: settings.max_images,
        })
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decodes one file into its original image and an opaque RGBA display copy.
///
/// Grayscale inputs are expanded to RGB and any alpha channel is dropped.
pub fn decode_file(path: &Path) -> ComposerResult<(DynamicImage, RgbaImage)> {
    let name = display_name(path);
    let original = image::open(path).map_err(|source| ComposerError::Decode {
        name: name.clone(),
        source,
    })?;

    if original.width() == 0 || original.height() == 0 {
        return Err(ComposerError::Decode {
            name,
            source: ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )),
        });
    }

    let display = DynamicImage::ImageRgb8(original.to_rgb8()).to_rgba8();
    log::debug!(
        "decoded {}: {}x{} {:?}",
        name,
        original.width(),
        original.height(),
        original.color()
    );
    Ok((original, display))
}

impl ImportBatch {
    /// Checks the selection size, then decodes every file in selection order.
    ///
    /// Fails only when the count is out of range. A file that cannot be
    /// decoded is recorded in `failures` and the rest of the batch continues.
    pub fn load(paths: &[PathBuf], settings: &Settings) -> ComposerResult<Self> {
        check_count(paths.len(), settings)?;

        let mut batch = Self::default();
        for (index, path) in paths.iter().enumerate() {
            let name = display_name(path);
            log::debug!("importing {}/{}: {}", index + 1, paths.len(), path.display());
            match decode_file(path) {
                Ok((original, display)) => {
                    let item = CanvasItem::new(name.clone(), display, original);
                    let thumbnail = Thumbnail::new(
                        item.id(),
                        name,
                        item.display_image(),
                        settings.thumbnail_size,
                    );
                    batch.loaded.push(LoadedImage {
                        index,
                        item,
                        thumbnail,
                    });
                }
                Err(error) => {
                    log::error!("failed to import {}: {}", path.display(), error);
                    batch.failures.push(ImportFailure { name, error });
                }
            }
        }
        Ok(batch)
    }
}
