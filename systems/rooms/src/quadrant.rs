use hideseek_core::{
    Axis, CellCoord, CellState, Corner, Cuboid, DrawOp, GenerationError, Material,
    QuadrantParams, QuadrantRoom, MIN_QUADRANT_ROOM_SIZE, PLAY_LEVEL,
};
use hideseek_world::Grid;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, trace};

/// Builds a single corner room and cuts its doors.
pub(crate) fn lay_out<R>(
    params: QuadrantParams,
    grid: &mut Grid,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Result<QuadrantRoom, GenerationError>
where
    R: Rng + ?Sized,
{
    let arena_size = grid.size();
    let room_size = match params.room_size {
        Some(room_size) => room_size,
        None => draw_room_size(arena_size, rng)?,
    };
    if room_size == 0 || room_size.saturating_add(2) > arena_size {
        return Err(GenerationError::InvalidParameters(format!(
            "quadrant room size {room_size} does not fit an arena of size {arena_size}"
        )));
    }

    let corner = params
        .corner
        .unwrap_or_else(|| Corner::ALL[rng.gen_range(0..Corner::ALL.len())]);
    let door_count = params.door_count.unwrap_or_else(|| rng.gen_range(1..=2));
    let door_walls = match door_count {
        1 if rng.gen_bool(0.5) => vec![Axis::Horizontal],
        1 => vec![Axis::Vertical],
        2 => vec![Axis::Horizontal, Axis::Vertical],
        other => {
            return Err(GenerationError::InvalidParameters(format!(
                "quadrant rooms take one or two doors, not {other}"
            )))
        }
    };

    let mut room = QuadrantRoom::new(corner, room_size, arena_size);
    for axis in door_walls {
        let candidates = room.door_candidates(axis);
        let door = candidates.choose(rng).copied().ok_or_else(|| {
            GenerationError::LayoutInfeasible(format!("the {axis} wall has no door cells"))
        })?;
        room.add_door(door);
    }

    let horizontal = room.horizontal_wall();
    let vertical = room.vertical_wall();
    for &cell in horizontal.iter().chain(vertical.iter()) {
        if room.doors().contains(&cell) {
            continue;
        }
        // The shared corner cell is claimed by whichever wall reaches it first.
        let _ = grid.occupy(cell, CellState::Wall);
    }

    push_wall(&horizontal, out);
    push_wall(&vertical, out);
    for &door in room.doors() {
        trace!(row = door.row(), column = door.column(), "quadrant door");
        out.push(DrawOp::FillRegion {
            shape: Cuboid::cell(door, PLAY_LEVEL),
            material: Material::Air,
        });
    }

    debug!(?corner, room_size, door_count, "quadrant room laid out");
    Ok(room)
}

fn draw_room_size<R>(arena_size: u32, rng: &mut R) -> Result<u32, GenerationError>
where
    R: Rng + ?Sized,
{
    let largest = (arena_size / 2).min(arena_size.saturating_sub(2));
    if largest < MIN_QUADRANT_ROOM_SIZE {
        return Err(GenerationError::InvalidParameters(format!(
            "an arena of size {arena_size} is too small for a quadrant room"
        )));
    }
    Ok(rng.gen_range(MIN_QUADRANT_ROOM_SIZE..=largest))
}

fn push_wall(cells: &[CellCoord], out: &mut Vec<DrawOp>) {
    if let (Some(&first), Some(&last)) = (cells.first(), cells.last()) {
        out.push(DrawOp::FillRegion {
            shape: Cuboid::between(first, last, PLAY_LEVEL),
            material: Material::Cobblestone,
        });
    }
}
