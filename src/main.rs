use clap::Parser;
use imgseq::{Cli, Commands, Renamer, Resizer};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Resize {
            input,
            output,
            width,
        } => {
            let stats = Resizer::new(input, output).with_target_width(width).run()?;
            for (file, reason) in &stats.errors {
                log::warn!("Failed: {}: {}", file, reason);
            }
        }
        Commands::Rename { dir, dry_run, yes } => {
            Renamer::new(dir, dry_run, yes).run()?;
        }
    }

    Ok(())
}
