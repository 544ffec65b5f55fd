#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that scatters agent start cells across the arena floor.

use hideseek_core::{CellCoord, CellState, GenerationError, Region};
use hideseek_world::{query, Grid};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Local draws allowed per agent for every cell of the arena.
pub const SPAWN_ATTEMPTS_PER_CELL: u64 = 16;

/// Whole placement passes attempted before giving up.
pub const MAX_SPAWN_PASSES: u32 = 16;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    num_agents: u32,
    min_distance: u32,
}

impl Config {
    /// Creates a configuration spawning `num_agents` agents kept apart by
    /// more than `min_distance` cells.
    #[must_use]
    pub const fn new(num_agents: u32, min_distance: u32) -> Self {
        Self {
            num_agents,
            min_distance,
        }
    }
}

/// Pure system that places agent spawn cells on the grid.
#[derive(Debug)]
pub struct Spawning {
    num_agents: u32,
    min_distance: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            num_agents: config.num_agents,
            min_distance: config.min_distance,
        }
    }

    /// Marks spawn cells on the grid and appends them to `out` in placement order.
    ///
    /// Every pair of spawns ends up separated by a Chebyshev distance greater
    /// than the configured minimum. A pass that stalls clears its agents and
    /// starts over.
    pub fn place<R>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        out: &mut Vec<CellCoord>,
    ) -> Result<(), GenerationError>
    where
        R: Rng + ?Sized,
    {
        if self.num_agents == 0 {
            return Ok(());
        }

        let free = query::free_cells(grid, |_| true);
        let available = u32::try_from(free)
            .unwrap_or(u32::MAX)
            .min(packing_limit(grid.size(), self.min_distance));
        if self.num_agents > available {
            return Err(GenerationError::CapacityExceeded {
                subject: "agents",
                requested: self.num_agents,
                available,
                region: Region::Anywhere,
            });
        }

        let budget = grid.area() as u64 * SPAWN_ATTEMPTS_PER_CELL;
        let mut spawns = Vec::with_capacity(self.num_agents as usize);
        for pass in 1..=MAX_SPAWN_PASSES {
            if self.run_pass(grid, budget, rng, &mut spawns) {
                debug!(agents = spawns.len(), pass, "agents spawned");
                out.append(&mut spawns);
                return Ok(());
            }

            let cleared = grid.clear_agents();
            spawns.clear();
            warn!(pass, cleared, "agent spawn pass stalled, starting over");
        }

        Err(GenerationError::SpawnPlacementFailed {
            agents: self.num_agents,
            passes: MAX_SPAWN_PASSES,
        })
    }

    fn run_pass<R>(
        &self,
        grid: &mut Grid,
        budget: u64,
        rng: &mut R,
        spawns: &mut Vec<CellCoord>,
    ) -> bool
    where
        R: Rng + ?Sized,
    {
        let size = grid.size();
        for _ in 0..self.num_agents {
            let candidate = (0..budget)
                .map(|_| CellCoord::new(rng.gen_range(0..size), rng.gen_range(0..size)))
                .find(|&cell| self.is_clear(grid, spawns, cell));
            let Some(cell) = candidate else {
                return false;
            };
            if !grid.occupy(cell, CellState::Agent) {
                return false;
            }
            trace!(row = cell.row(), column = cell.column(), "agent spawn");
            spawns.push(cell);
        }
        true
    }

    fn is_clear(&self, grid: &Grid, spawns: &[CellCoord], cell: CellCoord) -> bool {
        grid.is_vacant(cell)
            && spawns
                .iter()
                .all(|spawn| spawn.chebyshev_distance(cell) > self.min_distance)
    }
}

/// Largest number of cells on a `size` grid that are pairwise further than
/// `min_distance` apart.
///
/// Each row and column holds at most one such cell per run of
/// `min_distance + 1` consecutive indices.
#[must_use]
pub fn packing_limit(size: u32, min_distance: u32) -> u32 {
    let per_axis = u64::from(size).div_ceil(u64::from(min_distance) + 1);
    u32::try_from(per_axis * per_axis).unwrap_or(u32::MAX)
}
