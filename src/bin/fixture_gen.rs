use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use polyfix::{io::fixture::write_file, plan};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "fixture-gen")]
#[command(about = "Write polygon test fixtures approximating circles")]
struct Cmd {
    /// Directory the fixture files are written into
    #[arg(long, default_value = "text")]
    out_dir: PathBuf,

    /// Points per polygon, unless a plan sets its own
    #[arg(short = 'n', long, default_value_t = 10_000)]
    count: usize,

    /// Built-in fixture to write; repeatable. Defaults to `rotation` when no plan is given
    #[arg(long = "preset", value_enum)]
    presets: Vec<Preset>,

    /// JSON file holding a list of fixture plans
    #[arg(long)]
    plan: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Rotation,
    Translation,
    Scaled,
    Draw,
}

impl Preset {
    fn plan(self, count: usize) -> plan::FixturePlan {
        match self {
            Preset::Rotation => plan::rotation(count),
            Preset::Translation => plan::translation(count),
            Preset::Scaled => plan::scaled(count),
            Preset::Draw => plan::draw(count),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();

    let mut plans = cmd
        .presets
        .iter()
        .map(|p| p.plan(cmd.count))
        .collect::<Vec<_>>();

    if let Some(path) = &cmd.plan {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading plan {}", path.display()))?;
        let loaded =
            plan::from_json(&text).with_context(|| format!("parsing plan {}", path.display()))?;
        plans.extend(loaded);
    }

    if plans.is_empty() {
        plans.push(plan::rotation(cmd.count));
    }

    for plan in &plans {
        let path = cmd.out_dir.join(&plan.file);
        let fixture = plan
            .build(cmd.count)
            .with_context(|| format!("building fixture {}", plan.file))?;
        write_file(&path, &fixture).with_context(|| format!("writing {}", path.display()))?;
        println!("{}", path.display());
    }

    Ok(())
}
