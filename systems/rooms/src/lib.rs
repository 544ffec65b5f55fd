#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Room-shape strategies that partition the arena grid into rooms.
//!
//! Each strategy claims wall cells on the caller's [`Grid`], records the
//! doorways it cuts and appends the matching draw operations. Walls are
//! drawn in cobblestone and every door is carved back out with air so the
//! simulator sees the same openings the grid records.

mod dividers;
mod quadrant;

use hideseek_core::{DrawOp, GenerationError, RoomLayout, RoomStrategy};
use hideseek_world::{DoorSet, Grid};
use rand::Rng;

pub use dividers::{COLLISION_DOOR_REACH, DIVIDER_MARGIN, MAX_DIVIDER_ATTEMPTS, MIN_DIVIDER_GAP};

/// Lays out the rooms requested by `strategy`.
///
/// Returns the resolved room geometry. On error the grid and `out` may hold
/// partial work and must be discarded by the caller.
pub fn lay_out<R>(
    strategy: &RoomStrategy,
    grid: &mut Grid,
    doors: &mut DoorSet,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Result<RoomLayout, GenerationError>
where
    R: Rng + ?Sized,
{
    match *strategy {
        RoomStrategy::Quadrant(params) => {
            let room = quadrant::lay_out(params, grid, rng, out)?;
            Ok(RoomLayout::Quadrant { room })
        }
        RoomStrategy::Sequential { room_count } => {
            let dividers = dividers::lay_out(
                room_count,
                dividers::Collision::Stop,
                grid,
                doors,
                rng,
                out,
            )?;
            Ok(RoomLayout::Dividers { dividers })
        }
        RoomStrategy::Parallel { room_count } => {
            let dividers = dividers::lay_out(
                room_count,
                dividers::Collision::CutDoor,
                grid,
                doors,
                rng,
                out,
            )?;
            Ok(RoomLayout::Dividers { dividers })
        }
    }
}
