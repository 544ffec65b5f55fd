#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates hide-and-seek arenas.

mod config;
mod layout_transfer;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use hideseek_core::{CellCoord, DrawOp, LayoutRequest, RoomLayout, RoomStrategy};
use hideseek_mission::{render_mission, MissionSettings};
use hideseek_system_layout::{generate_with_retries, ArenaLayout};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{config::CliConfig, layout_transfer::LayoutTicket};

const DEFAULT_LOG_FILTER: &str = "warn,hideseek=info";

#[derive(Debug, Parser)]
#[command(author, version, about = "Procedural hide-and-seek arena generator", long_about = None)]
struct Args {
    /// TOML file describing the arena and the mission around it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout ticket reproducing a previously generated arena
    #[arg(long, conflicts_with_all = ["config", "seed"])]
    ticket: Option<String>,

    /// Seed of the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Edge length of the square play area
    #[arg(long)]
    arena_size: Option<u32>,

    /// Leaves out the outer arena wall
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Room strategy: quadrant, sequential or parallel
    #[arg(long)]
    strategy: Option<String>,

    /// Number of rooms for the sequential and parallel strategies
    #[arg(long)]
    room_count: Option<u32>,

    /// Number of blocks to place
    #[arg(long)]
    blocks: Option<u32>,

    /// Number of stairs to place
    #[arg(long)]
    stairs: Option<u32>,

    /// Number of agents to spawn
    #[arg(long)]
    agents: Option<u32>,

    /// Minimum Chebyshev distance between agent spawns
    #[arg(long)]
    spawn_distance: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Whole-arena generation attempts before giving up
    #[arg(long, default_value_t = 1)]
    regenerations: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Occupancy grid, one glyph per cell
    Ascii,
    /// Draw operations, rooms, spawns and grid as JSON
    Json,
    /// Simulator mission XML
    Mission,
    /// Single-line layout ticket
    Ticket,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    seed: u64,
    ticket: &'a str,
    request: &'a LayoutRequest,
    rooms: &'a RoomLayout,
    draw_ops: &'a [DrawOp],
    agent_spawns: &'a [CellCoord],
    grid: Vec<Vec<u8>>,
}

/// Entry point for the arena generator command-line interface.
fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let (seed, mut request, mission) = resolve_inputs(&args)?;
    apply_overrides(&args, &mut request)?;

    let ticket = LayoutTicket {
        seed,
        request: request.clone(),
    }
    .encode()
    .context("failed to encode layout ticket")?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let layout = generate_with_retries(&request, &mut rng, args.regenerations)
        .with_context(|| format!("failed to generate an arena from seed {seed}"))?;
    info!(seed, %ticket, "arena ready");

    let output = match args.format {
        OutputFormat::Ascii => layout.grid().to_string(),
        OutputFormat::Json => render_json(seed, &ticket, &request, &layout)?,
        OutputFormat::Mission => render_mission(
            request.arena_size,
            layout.draw_ops(),
            layout.agent_spawns(),
            &mission,
        ),
        OutputFormat::Ticket => ticket,
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the log subscriber")
}

fn resolve_inputs(args: &Args) -> Result<(u64, LayoutRequest, MissionSettings)> {
    if let Some(ticket) = &args.ticket {
        let ticket = LayoutTicket::decode(ticket).context("failed to decode layout ticket")?;
        return Ok((ticket.seed, ticket.request, MissionSettings::default()));
    }

    let config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let seed = match args.seed.or(config.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::thread_rng().gen();
            info!(seed, "no seed given, drew a fresh one");
            seed
        }
    };
    Ok((seed, config.layout, config.mission))
}

fn apply_overrides(args: &Args, request: &mut LayoutRequest) -> Result<()> {
    if let Some(arena_size) = args.arena_size {
        request.arena_size = arena_size;
    }
    if args.open {
        request.is_closed_arena = false;
    }
    if let Some(tag) = &args.strategy {
        request.room_strategy = RoomStrategy::from_tag(tag).context("invalid --strategy")?;
    }
    if let Some(count) = args.room_count {
        match &mut request.room_strategy {
            RoomStrategy::Sequential { room_count } | RoomStrategy::Parallel { room_count } => {
                *room_count = count;
            }
            RoomStrategy::Quadrant(_) => {
                bail!("--room-count only applies to the sequential and parallel strategies")
            }
        }
    }
    if let Some(blocks) = args.blocks {
        request.num_blocks = blocks;
    }
    if let Some(stairs) = args.stairs {
        request.num_stairs = stairs;
    }
    if let Some(agents) = args.agents {
        request.num_agents = agents;
    }
    if let Some(distance) = args.spawn_distance {
        request.min_agent_spawn_distance = distance;
    }
    Ok(())
}

fn render_json(
    seed: u64,
    ticket: &str,
    request: &LayoutRequest,
    layout: &ArenaLayout,
) -> Result<String> {
    let report = LayoutReport {
        seed,
        ticket,
        request,
        rooms: layout.rooms(),
        draw_ops: layout.draw_ops(),
        agent_spawns: layout.agent_spawns(),
        grid: layout
            .grid()
            .rows()
            .map(|row| row.iter().map(|state| state.code()).collect())
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialise layout report")
}
