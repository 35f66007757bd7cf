use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon::{DungeonConfig, generate_dungeon};
use env_logger::{Builder, Env};

mod config_file;
mod export;

use export::Format;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// Seed for the random stream
    seed: u64,
    /// TOML file with the remaining generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Pbm)]
    format: Format,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print generation counters and the fingerprint to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => config_file::load_config(path)?,
        None => DungeonConfig::default(),
    };
    let config = DungeonConfig { width: args.width, height: args.height, ..base };

    let dungeon = generate_dungeon(config, args.seed).with_context(|| {
        format!("Failed to generate {}x{} dungeon from seed {}", args.width, args.height, args.seed)
    })?;

    if args.stats {
        let stats = serde_json::to_string_pretty(&dungeon.stats)
            .with_context(|| "Failed to serialize generation stats")?;
        eprintln!("{stats}");
        eprintln!("Fingerprint: {:016x}", dungeon.fingerprint());
    }

    let rendered = export::render(&dungeon, args.format, args.seed)
        .with_context(|| "Failed to render dungeon")?;
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
