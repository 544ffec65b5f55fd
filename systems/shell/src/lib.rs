#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that lays down the terrain, floor and outer wall of an arena.

use hideseek_core::{Cuboid, DrawOp, Material, FLOOR_LEVEL, PLAY_LEVEL};
use tracing::debug;

/// Half extent of the terrain square reset around the arena.
pub const TERRAIN_EXTENT: i32 = 1000;

/// Highest level cleared above the terrain.
pub const CLEARANCE_LEVEL: i32 = 4;

/// Highest level covered by the outer wall.
pub const WALL_TOP_LEVEL: i32 = 3;

/// Appends the draw operations that build the arena shell.
///
/// The terrain around the arena is reset before the floor is laid. A closed
/// arena is walled with stone bricks one cell outside the play area, then
/// carved open again.
pub fn build(arena_size: u32, is_closed_arena: bool, out: &mut Vec<DrawOp>) {
    let terrain = -TERRAIN_EXTENT..=TERRAIN_EXTENT;
    out.push(DrawOp::FillRegion {
        shape: Cuboid::spanning(terrain.clone(), FLOOR_LEVEL..=FLOOR_LEVEL, terrain.clone()),
        material: Material::Grass,
    });
    out.push(DrawOp::FillRegion {
        shape: Cuboid::spanning(terrain.clone(), PLAY_LEVEL..=CLEARANCE_LEVEL, terrain),
        material: Material::Air,
    });

    let last = last_index(arena_size);
    out.push(DrawOp::FillRegion {
        shape: Cuboid::spanning(0..=last, FLOOR_LEVEL..=FLOOR_LEVEL, 0..=last),
        material: Material::IronBlock,
    });

    if is_closed_arena {
        let outer = -1..=last + 1;
        out.push(DrawOp::FillRegion {
            shape: Cuboid::spanning(outer.clone(), PLAY_LEVEL..=WALL_TOP_LEVEL, outer),
            material: Material::StoneBrick,
        });
        out.push(DrawOp::FillRegion {
            shape: Cuboid::spanning(0..=last, PLAY_LEVEL..=WALL_TOP_LEVEL, 0..=last),
            material: Material::Air,
        });
    }

    debug!(arena_size, is_closed_arena, "arena shell laid out");
}

fn last_index(arena_size: u32) -> i32 {
    i32::try_from(arena_size).map_or(i32::MAX - 1, |size| size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_index_is_one_below_size() {
        assert_eq!(last_index(10), 9);
        assert_eq!(last_index(1), 0);
    }
}
