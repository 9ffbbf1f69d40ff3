// imgseq/src/core/mod.rs
use thiserror::Error;

/// Width every processed image is normalized to, in pixels.
pub const TARGET_WIDTH: u32 = 1280;

/// JPEG encode quality for resizer output.
pub const JPEG_QUALITY: u8 = 95;

/// Prefix shared by every file in the output sequence (`sample3.jpeg`).
pub const SAMPLE_PREFIX: &str = "sample";

/// Extension given to resizer output files.
pub const OUTPUT_EXTENSION: &str = "jpeg";

/// Default output directory, relative to the site root.
pub const OUTPUT_DIR: &str = "resources/img";

/// Prefix for the renamer's intermediate names. Unlikely to collide with
/// anything already in the gallery directory; the executor still refuses
/// to run if one of these names is taken.
pub const TEMP_PREFIX: &str = "temp_rename_";

/// Extensions the renamer will touch.
pub const RENAME_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Extensions the resizer accepts as input.
pub const RESIZE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Rename failed: {0}")]
    RenameFailed(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Outcome of a resizer batch run.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub processed: usize,
    pub total: usize,
    pub errors: Vec<(String, String)>,
}

impl BatchStats {
    pub fn all_succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}
