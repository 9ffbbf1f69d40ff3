// imgseq/src/tasks/renamer.rs
//
// Brings a gallery directory back to the canonical `sample1..sampleK`
// naming, ordered by file modification time. Renames run in two phases
// (everything to a temp name, then every temp to its final name) so a
// target name that is still another file's current name is never
// overwritten mid-sequence.

use crate::core::{PipelineError, Result, RENAME_EXTENSIONS, SAMPLE_PREFIX, TEMP_PREFIX};
use crate::utils::{list_image_files, modified_time};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Directory held no qualifying image files.
    NoFiles,
    /// Every file already carries its target name.
    AlreadyNamed,
    /// Plan printed, nothing touched.
    DryRun(usize),
    /// User answered anything but yes at the prompt.
    Declined,
    /// Plan applied in full.
    Renamed(usize),
}

pub struct Renamer {
    dir: PathBuf,
    dry_run: bool,
    assume_yes: bool,
}

impl Renamer {
    pub fn new(dir: impl Into<PathBuf>, dry_run: bool, assume_yes: bool) -> Self {
        Self {
            dir: dir.into(),
            dry_run,
            assume_yes,
        }
    }

    pub fn run(&self) -> Result<RenameOutcome> {
        if !self.dir.is_dir() {
            return Err(PipelineError::InvalidParameter(format!(
                "Directory not found: {}",
                self.dir.display()
            )));
        }

        let mut files = list_image_files(&self.dir, &RENAME_EXTENSIONS)?;
        if files.is_empty() {
            println!("No image files found!");
            return Ok(RenameOutcome::NoFiles);
        }
        sort_by_mtime(&mut files)?;

        println!("Found {} image files", files.len());
        println!(
            "\nMode: {}\n",
            if self.dry_run {
                "DRY RUN (no changes will be made)"
            } else {
                "LIVE (files will be renamed)"
            }
        );

        let plan = build_plan(&files);
        if plan.is_empty() {
            println!("All files are already named correctly!");
            return Ok(RenameOutcome::AlreadyNamed);
        }

        print_plan(&plan);

        if self.dry_run {
            println!("Dry run complete. Run without --dry-run to apply changes.");
            return Ok(RenameOutcome::DryRun(plan.len()));
        }

        if !self.assume_yes && !confirm()? {
            println!("Aborted.");
            return Ok(RenameOutcome::Declined);
        }

        let renamed = apply_plan(&plan)?;
        println!("\nSuccessfully renamed {} files!", renamed);
        Ok(RenameOutcome::Renamed(renamed))
    }
}

/// Sort ascending by modification time. The sort is stable, so files with
/// identical timestamps keep their listing order; on filesystems with
/// coarse timestamps that order is not guaranteed between runs.
pub fn sort_by_mtime(files: &mut Vec<PathBuf>) -> Result<()> {
    let mut keyed = files
        .iter()
        .map(|path| Ok((modified_time(path)?, path.clone())))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(mtime, _)| *mtime);
    *files = keyed.into_iter().map(|(_, path)| path).collect();
    Ok(())
}

/// Assign `sample{index}{ext}` to each file in order, skipping files that
/// already carry their target name.
pub fn build_plan(sorted: &[PathBuf]) -> Vec<RenameStep> {
    sorted
        .iter()
        .enumerate()
        .filter_map(|(i, path)| {
            let new_name = format!("{}{}{}", SAMPLE_PREFIX, i + 1, extension_suffix(path));
            if path.file_name().and_then(|n| n.to_str()) == Some(new_name.as_str()) {
                None
            } else {
                Some(RenameStep {
                    source: path.clone(),
                    target: path.with_file_name(new_name),
                })
            }
        })
        .collect()
}

/// Apply the plan: phase 1 moves every source to a temp name, phase 2
/// moves every temp to its final target. On any failure a completed move
/// is reversed (finals back to temps, temps back to originals) before the
/// error is returned; files that cannot be restored are listed for manual
/// recovery.
pub fn apply_plan(plan: &[RenameStep]) -> Result<usize> {
    let temps: Vec<PathBuf> = plan
        .iter()
        .enumerate()
        .map(|(i, step)| temp_path(&step.source, i))
        .collect();

    // Preflight so phase 1 never clobbers an existing file.
    if let Some(taken) = temps.iter().find(|t| t.exists()) {
        return Err(PipelineError::RenameFailed(format!(
            "temporary name already exists: {}",
            taken.display()
        )));
    }

    let mut staged: Vec<Stage> = Vec::new();
    for (step, temp) in plan.iter().zip(&temps) {
        if let Err(e) = fs::rename(&step.source, temp) {
            let detail = format!("{} -> {}: {}", step.source.display(), temp.display(), e);
            rollback(&staged, 0);
            return Err(PipelineError::RenameFailed(detail));
        }
        log::debug!(
            "Temp: {} -> {}",
            step.source.display(),
            temp.display()
        );
        staged.push(Stage {
            source: step.source.clone(),
            temp: temp.clone(),
            target: step.target.clone(),
        });
    }

    let mut committed = 0;
    for stage in &staged {
        if let Err(e) = fs::rename(&stage.temp, &stage.target) {
            let detail = format!("{} -> {}: {}", stage.temp.display(), stage.target.display(), e);
            rollback(&staged, committed);
            return Err(PipelineError::RenameFailed(detail));
        }
        log::debug!("Final: {} -> {}", stage.temp.display(), stage.target.display());
        committed += 1;
    }

    Ok(plan.len())
}

struct Stage {
    source: PathBuf,
    temp: PathBuf,
    target: PathBuf,
}

fn temp_path(source: &Path, index: usize) -> PathBuf {
    source.with_file_name(format!(
        "{}{}{}",
        TEMP_PREFIX,
        index,
        extension_suffix(source)
    ))
}

fn extension_suffix(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Undo a partially applied plan. `committed` is how many phase-2 moves
/// completed; those go back to their temp names first, then every
/// surviving temp returns to its original name.
fn rollback(staged: &[Stage], committed: usize) {
    if staged.is_empty() {
        return;
    }
    log::warn!("Rename interrupted, rolling back {} staged files", staged.len());

    for stage in staged[..committed].iter().rev() {
        if let Err(e) = fs::rename(&stage.target, &stage.temp) {
            log::error!(
                "Could not undo {} -> {}: {}",
                stage.temp.display(),
                stage.target.display(),
                e
            );
        }
    }

    let mut stranded = Vec::new();
    for stage in staged.iter().rev() {
        if !stage.temp.exists() {
            continue;
        }
        if let Err(e) = fs::rename(&stage.temp, &stage.source) {
            log::error!("Could not restore {}: {}", stage.source.display(), e);
            stranded.push(stage.temp.clone());
        }
    }

    if !stranded.is_empty() {
        println!("Temporary files left for manual recovery:");
        for temp in &stranded {
            println!("  {}", temp.display());
        }
    }
}

fn print_plan(plan: &[RenameStep]) {
    println!("Rename plan:");
    println!("{}", "-".repeat(60));
    for step in plan {
        println!(
            "{:30} -> {}",
            step.source.file_name().unwrap_or_default().to_string_lossy(),
            step.target.file_name().unwrap_or_default().to_string_lossy()
        );
    }
    println!("{}", "-".repeat(60));
    println!("\nTotal files to rename: {}\n", plan.len());
}

fn confirm() -> Result<bool> {
    print!("Proceed with renaming? (yes/no): ");
    io::stdout().flush()?;
    read_confirmation(io::stdin().lock())
}

/// Only `yes` or `y` (case-insensitive, trimmed) proceeds; any other
/// answer aborts.
fn read_confirmation(mut input: impl BufRead) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "yes" || answer == "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("img").join(n)).collect()
    }

    #[test]
    fn plan_assigns_sequential_names_preserving_extensions() {
        let plan = build_plan(&paths(&["b.png", "a.jpg", "c.webp"]));
        let targets: Vec<_> = plan
            .iter()
            .map(|s| s.target.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(targets, ["sample1.png", "sample2.jpg", "sample3.webp"]);
    }

    #[test]
    fn plan_excludes_already_correct_names() {
        // Mtime rank 2 is already sample2.jpg, so only the others move.
        let plan = build_plan(&paths(&["sample5.jpg", "sample2.jpg", "sample7.jpg"]));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].source.file_name().unwrap(), "sample5.jpg");
        assert_eq!(plan[0].target.file_name().unwrap(), "sample1.jpg");
        assert_eq!(plan[1].source.file_name().unwrap(), "sample7.jpg");
        assert_eq!(plan[1].target.file_name().unwrap(), "sample3.jpg");
    }

    #[test]
    fn plan_is_empty_when_everything_matches() {
        let plan = build_plan(&paths(&["sample1.jpg", "sample2.png"]));
        assert!(plan.is_empty());
    }

    #[test]
    fn confirmation_accepts_only_yes_or_y() {
        for answer in ["yes\n", "y\n", "YES\n", "  Y  \n", "yes"] {
            assert!(read_confirmation(answer.as_bytes()).unwrap());
        }
        for answer in ["no\n", "n\n", "yep\n", "\n", "", "ja\n"] {
            assert!(!read_confirmation(answer.as_bytes()).unwrap());
        }
    }

    #[test]
    fn apply_handles_overlapping_old_and_new_names() {
        // Two files whose targets are each other's current names.
        let temp = TempDir::new().unwrap();
        temp.child("sample2.jpg").write_str("first").unwrap();
        temp.child("sample1.jpg").write_str("second").unwrap();

        let plan = vec![
            RenameStep {
                source: temp.path().join("sample2.jpg"),
                target: temp.path().join("sample1.jpg"),
            },
            RenameStep {
                source: temp.path().join("sample1.jpg"),
                target: temp.path().join("sample2.jpg"),
            },
        ];

        assert_eq!(apply_plan(&plan).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("sample1.jpg")).unwrap(),
            "first"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("sample2.jpg")).unwrap(),
            "second"
        );
    }

    #[test]
    fn apply_refuses_existing_temp_name() {
        let temp = TempDir::new().unwrap();
        temp.child("a.jpg").write_str("x").unwrap();
        temp.child("temp_rename_0.jpg").write_str("y").unwrap();

        let plan = vec![RenameStep {
            source: temp.path().join("a.jpg"),
            target: temp.path().join("sample1.jpg"),
        }];

        assert!(apply_plan(&plan).is_err());
        // Nothing moved.
        assert!(temp.path().join("a.jpg").exists());
        assert!(!temp.path().join("sample1.jpg").exists());
    }

    #[test]
    fn failed_apply_rolls_back_to_original_names() {
        let temp = TempDir::new().unwrap();
        temp.child("a.jpg").write_str("a").unwrap();
        temp.child("b.jpg").write_str("b").unwrap();
        // A directory squatting on b's target makes phase 2 fail there.
        std::fs::create_dir(temp.path().join("sample2.jpg")).unwrap();

        let plan = vec![
            RenameStep {
                source: temp.path().join("a.jpg"),
                target: temp.path().join("sample1.jpg"),
            },
            RenameStep {
                source: temp.path().join("b.jpg"),
                target: temp.path().join("sample2.jpg"),
            },
        ];

        assert!(apply_plan(&plan).is_err());
        assert_eq!(
            std::fs::read_to_string(temp.path().join("a.jpg")).unwrap(),
            "a"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("b.jpg")).unwrap(),
            "b"
        );
        assert!(!temp.path().join("sample1.jpg").is_file());
        assert!(!temp.path().join("temp_rename_0.jpg").exists());
        assert!(!temp.path().join("temp_rename_1.jpg").exists());
    }
}
