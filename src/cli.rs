// imgseq/src/cli.rs
use crate::core::{OUTPUT_DIR, TARGET_WIDTH};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "imgseq",
    version,
    about = "Static-site image pipeline: resize sources to a fixed width and renumber sample sequences"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resize source images and append them to the sample sequence
    Resize {
        /// Source directory to scan (non-recursive)
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Directory the sample sequence lives in
        #[arg(short, long, default_value = OUTPUT_DIR)]
        output: PathBuf,

        /// Target width in pixels
        #[arg(short, long, default_value_t = TARGET_WIDTH)]
        width: u32,
    },

    /// Renumber the sample sequence by modification time
    Rename {
        /// Directory the sample sequence lives in
        #[arg(short, long, default_value = OUTPUT_DIR)]
        dir: PathBuf,

        /// Print the rename plan without touching any file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
