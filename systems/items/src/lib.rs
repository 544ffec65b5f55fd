#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rejection sampler that scatters blocks and stairs across the arena.

use hideseek_core::{
    CellCoord, DrawOp, GenerationError, ItemGenRules, ItemKind, QuadrantRoom, Region,
};
use hideseek_world::{query, Grid};
use rand::Rng;
use tracing::{debug, trace};

/// Draws allowed per item for every cell of the arena.
pub const SAMPLING_ATTEMPTS_PER_CELL: u64 = 32;

/// Item counts and placement regions for a single layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rules: ItemGenRules,
    num_blocks: u32,
    num_stairs: u32,
}

impl Config {
    /// Creates a configuration placing the given number of blocks and stairs.
    #[must_use]
    pub const fn new(rules: ItemGenRules, num_blocks: u32, num_stairs: u32) -> Self {
        Self {
            rules,
            num_blocks,
            num_stairs,
        }
    }

    /// Number of items of `kind` to place.
    #[must_use]
    pub const fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Block => self.num_blocks,
            ItemKind::Stair => self.num_stairs,
        }
    }

    /// Region every item of `kind` must land in.
    #[must_use]
    pub const fn region(&self, kind: ItemKind) -> Region {
        self.rules.region_for(kind)
    }

    /// Region covering both item kinds.
    #[must_use]
    pub const fn combined_region(&self) -> Region {
        Region::from_flags(
            self.rules.blocks_inside || self.rules.stairs_inside,
            self.rules.blocks_outside || self.rules.stairs_outside,
        )
    }
}

/// Places the configured blocks, then stairs, appending one draw operation per item.
///
/// Fails with [`GenerationError::CapacityExceeded`] before drawing a single
/// sample when a region cannot hold the requested items, and with
/// [`GenerationError::PlacementFailed`] when an item exhausts its draw budget.
pub fn place<R>(
    config: &Config,
    quadrant: Option<&QuadrantRoom>,
    grid: &mut Grid,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Result<(), GenerationError>
where
    R: Rng + ?Sized,
{
    check_capacity(config, quadrant, grid)?;

    let budget = grid.area() as u64 * SAMPLING_ATTEMPTS_PER_CELL;
    for kind in [ItemKind::Block, ItemKind::Stair] {
        let requested = config.count(kind);
        let region = config.region(kind);
        for placed in 0..requested {
            let cell = sample(grid, budget, rng, |cell| region.admits(cell, quadrant)).ok_or(
                GenerationError::PlacementFailed {
                    item: kind,
                    placed,
                    requested,
                },
            )?;
            if !grid.occupy(cell, kind.cell_state()) {
                return Err(GenerationError::PlacementFailed {
                    item: kind,
                    placed,
                    requested,
                });
            }
            trace!(item = %kind, row = cell.row(), column = cell.column(), "item placed");
            out.push(DrawOp::PlaceItem {
                cell,
                material: kind.material(),
            });
        }
        debug!(item = %kind, count = requested, %region, "items placed");
    }

    Ok(())
}

fn check_capacity(
    config: &Config,
    quadrant: Option<&QuadrantRoom>,
    grid: &Grid,
) -> Result<(), GenerationError> {
    let blocks = config.count(ItemKind::Block);
    let stairs = config.count(ItemKind::Stair);
    let demands = [
        ("blocks", blocks, config.region(ItemKind::Block)),
        ("stairs", stairs, config.region(ItemKind::Stair)),
        ("items", blocks.saturating_add(stairs), config.combined_region()),
    ];

    for (subject, requested, region) in demands {
        let free = query::free_cells(grid, |cell| region.admits(cell, quadrant));
        let available = u32::try_from(free).unwrap_or(u32::MAX);
        if requested > available {
            return Err(GenerationError::CapacityExceeded {
                subject,
                requested,
                available,
                region,
            });
        }
    }

    Ok(())
}

/// Draws uniform cells until one is empty and admitted, or the budget runs out.
fn sample<R, F>(grid: &Grid, budget: u64, rng: &mut R, admits: F) -> Option<CellCoord>
where
    R: Rng + ?Sized,
    F: Fn(CellCoord) -> bool,
{
    let size = grid.size();
    if size == 0 {
        return None;
    }
    (0..budget)
        .map(|_| CellCoord::new(rng.gen_range(0..size), rng.gen_range(0..size)))
        .find(|&cell| grid.is_vacant(cell) && admits(cell))
}
