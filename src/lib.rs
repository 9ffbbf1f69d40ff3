pub mod cli;
pub mod core;
pub mod tasks;
pub mod utils;

pub use cli::{Cli, Commands};
pub use core::{
    BatchStats, PipelineError, Result, JPEG_QUALITY, OUTPUT_DIR, OUTPUT_EXTENSION,
    RENAME_EXTENSIONS, RESIZE_EXTENSIONS, SAMPLE_PREFIX, TARGET_WIDTH, TEMP_PREFIX,
};
pub use tasks::{RenameOutcome, RenameStep, Renamer, ResizeSummary, Resizer};
pub use utils::{has_extension, list_image_files, next_sample_number, sample_number};
