use anyhow::{Context, Result};
use clap::Parser;
use particula_core::config::CollisionMode;
use particula_core::init_logging;
use particula_lib::app::App;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (default: run until Ctrl+C)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Number of particles (overrides the config file)
    #[arg(long)]
    particles: Option<usize>,

    /// Number of particle types (overrides the config file)
    #[arg(long)]
    types: Option<usize>,

    /// How often a colliding pair is pushed apart per tick
    #[arg(long, value_enum)]
    collision_mode: Option<CollisionArg>,

    /// Pace ticks at the configured target rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CollisionArg {
    /// Both orderings of a pair apply the impulse
    Ordered,
    /// One impulse per pair
    Unordered,
}

impl From<CollisionArg> for CollisionMode {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Ordered => CollisionMode::PerOrderedPair,
            CollisionArg::Unordered => CollisionMode::PerUnorderedPair,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = App::load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(particles) = args.particles {
        config.world.num_particles = particles;
    }
    if let Some(types) = args.types {
        config.world.num_types = types;
    }
    if let Some(mode) = args.collision_mode {
        config.interaction.collision_mode = mode.into();
    }
    config.validate()?;

    let mut app = App::new(config, Some(args.config.clone()))?;
    let last = app.run(args.ticks, args.realtime).await?;

    if let Some(path) = args.snapshot {
        let json = last.to_json()?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), tick = last.tick, "Snapshot written");
    }

    Ok(())
}
