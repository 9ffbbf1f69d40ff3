// imgseq/src/tasks/mod.rs
pub mod renamer;
pub mod resizer;

pub use renamer::{RenameOutcome, RenameStep, Renamer};
pub use resizer::{Resizer, ResizeSummary};
