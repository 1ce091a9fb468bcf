use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use polyfix::flags::{self, DedupConfig, DedupMode, Locate, Outcome, Progress};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "dedup-flags")]
#[command(about = "Remove redundant compiler defines from generated flags.make files")]
struct Cmd {
    /// Build directory holding `CMakeFiles/`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Remove the first redundant define per file, or all of them
    #[arg(long, value_enum, default_value_t = Mode::First)]
    mode: Mode,

    /// Require the marker on this 0-based line instead of searching for it
    #[arg(long)]
    line: Option<usize>,

    /// Text identifying the compiler defines line
    #[arg(long, default_value = flags::CXX_DEFINES)]
    marker: String,

    /// Report without rewriting any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    First,
    All,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();

    let config = DedupConfig {
        mode: match cmd.mode {
            Mode::First => DedupMode::First,
            Mode::All => DedupMode::All,
        },
        locate: cmd.line.map(Locate::Index).unwrap_or_default(),
        marker: cmd.marker,
        dry_run: cmd.dry_run,
        ..Default::default()
    };

    flags::run(&cmd.root, &config, |progress| match progress {
        Progress::Inspecting(path) => {
            print!("Inspecting '{}'. ", path.display());
            // the status follows once the file is done, or the error does
            let _ = io::stdout().flush();
        }
        Progress::Finished(_, outcome) => {
            let status = match outcome {
                Outcome::Clean => "No problems found.",
                Outcome::Edited { .. } => "Editing... Done.",
                Outcome::DryRun { .. } => "Would edit (dry run).",
            };
            println!("{}", status);
        }
    })
    .with_context(|| format!("deduplicating flags under {}", cmd.root.display()))?;

    println!("\nAll done. Try `make install` again.");
    Ok(())
}
