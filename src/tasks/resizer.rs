// imgseq/src/tasks/resizer.rs
//
// Normalizes a batch of source images to a fixed width and appends them
// to the `sampleN.jpeg` sequence in the output directory, continuing from
// the highest number already present.

use crate::core::{
    BatchStats, Result, JPEG_QUALITY, OUTPUT_EXTENSION, RESIZE_EXTENSIONS, SAMPLE_PREFIX,
    TARGET_WIDTH,
};
use crate::utils::{list_image_files, next_sample_number};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageReader, Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct ResizeSummary {
    pub from: (u32, u32),
    pub to: (u32, u32),
}

impl ResizeSummary {
    fn action(&self) -> &'static str {
        if self.from.0 == self.to.0 {
            "Copied"
        } else if self.from.0 < self.to.0 {
            "Upscaled"
        } else {
            "Resized"
        }
    }
}

pub struct Resizer {
    source_dir: PathBuf,
    output_dir: PathBuf,
    target_width: u32,
}

impl Resizer {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            target_width: TARGET_WIDTH,
        }
    }

    pub fn with_target_width(mut self, width: u32) -> Self {
        self.target_width = width;
        self
    }

    pub fn run(&self) -> Result<BatchStats> {
        let mut files = list_image_files(&self.source_dir, &RESIZE_EXTENSIONS)?;
        files.sort();

        let mut stats = BatchStats {
            total: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            println!("No images found in {}.", self.source_dir.display());
            println!("Supported formats: {}", RESIZE_EXTENSIONS.join(", "));
            return Ok(stats);
        }

        std::fs::create_dir_all(&self.output_dir)?;

        println!("Found {} image(s) to process:\n", files.len());
        let pb = create_progress_bar(files.len());

        let mut next = next_sample_number(&self.output_dir, SAMPLE_PREFIX);
        for input in &files {
            let name = input.file_name().unwrap_or_default().to_string_lossy();
            let output_name = format!("{}{}.{}", SAMPLE_PREFIX, next, OUTPUT_EXTENSION);
            pb.set_message(format!("{} -> {}", name, output_name));

            match self.process_file(input, &self.output_dir.join(&output_name)) {
                Ok(summary) => {
                    log::info!(
                        "{} {} from {}x{} to {}x{} ({})",
                        summary.action(),
                        name,
                        summary.from.0,
                        summary.from.1,
                        summary.to.0,
                        summary.to.1,
                        output_name
                    );
                    stats.processed += 1;
                    next += 1;
                }
                Err(e) => {
                    // Skip the file; its sample number is reused by the next one.
                    log::error!("Skipping {}: {}", name, e);
                    stats.errors.push((name.into_owned(), e.to_string()));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        println!(
            "Successfully processed {}/{} image(s)",
            stats.processed, stats.total
        );
        println!("  Output directory: {}", self.output_dir.display());

        Ok(stats)
    }

    fn process_file(&self, input: &Path, output: &Path) -> Result<ResizeSummary> {
        log::debug!("Loading image from: {}", input.display());
        let image = ImageReader::open(input)?.with_guessed_format()?.decode()?;
        let (width, height) = (image.width(), image.height());

        // JPEG output cannot carry transparency.
        let flat = flatten_to_rgb(&image);

        let resized = if width == self.target_width {
            log::debug!("Already at {} px wide, encoding as-is", self.target_width);
            flat
        } else {
            let new_height = scaled_height(width, height, self.target_width);
            image::imageops::resize(&flat, self.target_width, new_height, FilterType::Lanczos3)
        };

        save_jpeg(&resized, output, JPEG_QUALITY)?;

        Ok(ResizeSummary {
            from: (width, height),
            to: (resized.width(), resized.height()),
        })
    }
}

/// Composite any transparency onto an opaque white background, yielding a
/// plain three-channel image.
pub fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut flat = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let out = flat.get_pixel_mut(x, y);
        for channel in 0..3 {
            out[channel] = ((pixel[channel] as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        }
    }
    flat
}

/// Height after scaling to `target_width` with the aspect ratio preserved.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (target_width as f64 * height as f64 / width as f64).round() as u32;
    scaled.max(1)
}

pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    log::debug!(
        "Saving {}x{} JPEG to {} (quality {})",
        image.width(),
        image.height(),
        path.display(),
        quality
    );

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    writer.flush()?;
    Ok(())
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
