use anyhow::{Result, bail};
use clap::Parser;
use dungeon::{DungeonConfig, audit, generate_dungeon};
use env_logger::{Builder, Env};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to check
    #[arg(short, long, default_value_t = 1000)]
    count: u64,
    #[arg(long, default_value_t = 100)]
    width: usize,
    #[arg(long, default_value_t = 50)]
    height: usize,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = DungeonConfig::with_size(args.width, args.height);

    println!(
        "Starting fuzz harness on {}x{} from seed {} over {} seeds...",
        args.width, args.height, args.seed, args.count
    );

    let mut loops_eliminated = 0;
    for seed in args.seed..args.seed.saturating_add(args.count) {
        let dungeon = match generate_dungeon(config, seed) {
            Ok(dungeon) => dungeon,
            Err(error) => bail!("Generation failed on seed {seed}: {error}"),
        };
        if let Err(violation) = audit(&dungeon) {
            bail!("Invariant failed on seed {seed}: {violation}");
        }
        loops_eliminated += dungeon.stats.loops_eliminated;
    }

    println!("All {} seeds passed; {loops_eliminated} loops eliminated in total.", args.count);
    Ok(())
}
