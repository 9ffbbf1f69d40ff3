// imgseq/src/utils/mod.rs
use crate::core::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// True if the path carries one of the given extensions (case-insensitive).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect the image files directly inside `dir` (non-recursive).
/// Order is whatever the directory listing yields; callers sort.
pub fn list_image_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_extension(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect();

    log::debug!("Found {} image files in {}", paths.len(), dir.display());
    Ok(paths)
}

pub fn modified_time(path: &Path) -> Result<SystemTime> {
    Ok(std::fs::metadata(path)?.modified()?)
}

/// Parse the sequence number out of a sample file name:
/// `sample12.jpeg` -> Some(12). The whole stem after the prefix must be
/// digits; anything else is not part of the sequence.
pub fn sample_number(file_name: &str, prefix: &str) -> Option<u64> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    stem.strip_prefix(prefix)?.parse().ok()
}

/// One past the highest sample number already present in `dir`, or 1 when
/// the directory is missing, empty, or holds no parseable sample names.
pub fn next_sample_number(dir: &Path, prefix: &str) -> u64 {
    if !dir.exists() {
        return 1;
    }

    let max = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| sample_number(name, prefix))
        })
        .max();

    max.map(|n| n + 1).unwrap_or(1)
}
