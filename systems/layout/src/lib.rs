#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestrates the generation systems into a complete arena layout.
//!
//! A layout is produced in one synchronous pass: the request is validated,
//! the shell is laid down, the room strategy partitions the grid, items are
//! scattered and finally agents are spawned. Nothing is kept between calls.

use hideseek_core::{CellCoord, DrawOp, GenerationError, LayoutRequest, RoomLayout};
use hideseek_system_items as items;
use hideseek_system_rooms as rooms;
use hideseek_system_shell as shell;
use hideseek_system_spawning::{Config as SpawnConfig, Spawning};
use hideseek_world::{DoorSet, Grid};
use rand::Rng;
use tracing::{info, warn};

/// Fully generated arena ready to be handed to the simulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaLayout {
    draw_ops: Vec<DrawOp>,
    grid: Grid,
    agent_spawns: Vec<CellCoord>,
    rooms: RoomLayout,
}

impl ArenaLayout {
    /// Draw operations in the order the simulator must apply them.
    #[must_use]
    pub fn draw_ops(&self) -> &[DrawOp] {
        &self.draw_ops
    }

    /// Final occupancy grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Agent spawn cells in placement order.
    #[must_use]
    pub fn agent_spawns(&self) -> &[CellCoord] {
        &self.agent_spawns
    }

    /// Resolved room geometry.
    #[must_use]
    pub fn rooms(&self) -> &RoomLayout {
        &self.rooms
    }
}

/// Generates a complete arena layout for `request`.
///
/// No partial layout is returned on error.
pub fn generate_layout<R>(
    request: &LayoutRequest,
    rng: &mut R,
) -> Result<ArenaLayout, GenerationError>
where
    R: Rng + ?Sized,
{
    request.validate()?;

    let mut grid = Grid::new(request.arena_size);
    let mut doors = DoorSet::default();
    let mut draw_ops = Vec::new();

    shell::build(request.arena_size, request.is_closed_arena, &mut draw_ops);

    let room_layout = rooms::lay_out(
        &request.room_strategy,
        &mut grid,
        &mut doors,
        rng,
        &mut draw_ops,
    )?;

    items::place(
        &items::Config::new(request.item_rules, request.num_blocks, request.num_stairs),
        room_layout.quadrant(),
        &mut grid,
        rng,
        &mut draw_ops,
    )?;

    let mut agent_spawns = Vec::new();
    Spawning::new(SpawnConfig::new(
        request.num_agents,
        request.min_agent_spawn_distance,
    ))
    .place(&mut grid, rng, &mut agent_spawns)?;

    info!(
        arena_size = request.arena_size,
        strategy = request.room_strategy.tag(),
        draw_ops = draw_ops.len(),
        agents = agent_spawns.len(),
        "arena layout generated"
    );

    Ok(ArenaLayout {
        draw_ops,
        grid,
        agent_spawns,
        rooms: room_layout,
    })
}

/// Reports whether regenerating from scratch may succeed where a run failed.
#[must_use]
pub const fn is_retryable(error: &GenerationError) -> bool {
    matches!(
        error,
        GenerationError::LayoutInfeasible(_)
            | GenerationError::PlacementFailed { .. }
            | GenerationError::SpawnPlacementFailed { .. }
    )
}

/// Generates a layout, regenerating from scratch up to `attempts` times when
/// a run fails for a reason a fresh draw might avoid.
pub fn generate_with_retries<R>(
    request: &LayoutRequest,
    rng: &mut R,
    attempts: u32,
) -> Result<ArenaLayout, GenerationError>
where
    R: Rng + ?Sized,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match generate_layout(request, rng) {
            Err(error) if attempt < attempts && is_retryable(&error) => {
                warn!(attempt, %error, "arena generation failed, regenerating");
                attempt += 1;
            }
            result => return result,
        }
    }
}
