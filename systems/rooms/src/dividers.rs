use hideseek_core::{
    Axis, CellCoord, CellState, Cuboid, DrawOp, Divider, GenerationError, Material, PLAY_LEVEL,
};
use hideseek_world::{DoorSet, Grid};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, trace};

/// Distance kept between a divider and the arena edge it runs parallel to.
pub const DIVIDER_MARGIN: u32 = 3;

/// Minimum index difference between two dividers of the same orientation.
pub const MIN_DIVIDER_GAP: u32 = 2;

/// Index draws attempted for a single divider before giving up.
pub const MAX_DIVIDER_ATTEMPTS: u32 = 64;

/// Farthest a collision door may sit from the point of collision.
pub const COLLISION_DOOR_REACH: u32 = 3;

/// Behaviour when a growing divider runs into an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Collision {
    /// Stop growing.
    Stop,
    /// Stop growing and cut a second door into the divider that was hit.
    CutDoor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// Cells claimed by a divider that has not yet been committed to the grid.
#[derive(Debug)]
struct Growth {
    axis: Axis,
    index: u32,
    cells: Vec<CellCoord>,
    collision: Option<CellCoord>,
}

/// Places `room_count - 1` dividers, alternating orientation starting vertical.
pub(crate) fn lay_out<R>(
    room_count: u32,
    collision: Collision,
    grid: &mut Grid,
    doors: &mut DoorSet,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Result<Vec<Divider>, GenerationError>
where
    R: Rng + ?Sized,
{
    if room_count == 0 {
        return Err(GenerationError::InvalidParameters(
            "room count must be positive".to_owned(),
        ));
    }

    let wanted = room_count - 1;
    let mut dividers: Vec<Divider> = Vec::new();
    if wanted == 0 {
        return Ok(dividers);
    }

    let smallest = 2 * DIVIDER_MARGIN + 1;
    if grid.size() < smallest {
        return Err(GenerationError::LayoutInfeasible(format!(
            "an arena of size {} cannot be divided, dividers need at least {smallest} cells",
            grid.size()
        )));
    }

    let mut axis = Axis::Vertical;
    for _ in 0..wanted {
        let growth = grow_divider(axis, &dividers, grid, doors, rng)?;
        let hit = growth.collision;
        let divider = commit(growth, grid, doors, rng, out)?;
        trace!(
            axis = %divider.axis(),
            index = divider.index(),
            length = divider.len(),
            "divider placed"
        );

        if let (Collision::CutDoor, Some(hit)) = (collision, hit) {
            if let Some(existing) = dividers.iter_mut().find(|existing| existing.contains(hit)) {
                match cut_collision_door(existing, hit, grid, doors, rng, out) {
                    Some(door) => trace!(
                        row = door.row(),
                        column = door.column(),
                        "collision door cut"
                    ),
                    None => debug!(
                        row = hit.row(),
                        column = hit.column(),
                        "no room for a collision door"
                    ),
                }
            }
        }

        dividers.push(divider);
        axis = axis.perpendicular();
    }

    debug!(dividers = dividers.len(), "dividers laid out");
    Ok(dividers)
}

fn grow_divider<R>(
    axis: Axis,
    dividers: &[Divider],
    grid: &Grid,
    doors: &DoorSet,
    rng: &mut R,
) -> Result<Growth, GenerationError>
where
    R: Rng + ?Sized,
{
    let size = grid.size();
    let lowest = DIVIDER_MARGIN;
    let highest = size - 1 - DIVIDER_MARGIN;

    for attempt in 1..=MAX_DIVIDER_ATTEMPTS {
        let index = rng.gen_range(lowest..=highest);
        if doors.blocks(axis, index) {
            debug!(attempt, %axis, index, "divider would seal a door");
            continue;
        }
        if dividers
            .iter()
            .any(|divider| divider.axis() == axis && divider.index().abs_diff(index) < MIN_DIVIDER_GAP)
        {
            debug!(attempt, %axis, index, "divider too close to a parallel divider");
            continue;
        }

        let from_start = rng.gen_bool(0.5);
        let positions: Vec<u32> = if from_start {
            (0..size).collect()
        } else {
            (0..size).rev().collect()
        };

        let mut cells = Vec::new();
        let mut collision = None;
        for position in positions {
            let cell = axis.cell_at(index, position);
            if grid.is_vacant(cell) {
                cells.push(cell);
            } else {
                collision = Some(cell);
                break;
            }
        }

        if cells.is_empty() {
            debug!(attempt, %axis, index, "divider blocked at its first cell");
            continue;
        }

        return Ok(Growth {
            axis,
            index,
            cells,
            collision,
        });
    }

    Err(GenerationError::LayoutInfeasible(format!(
        "no room for a {axis} divider after {MAX_DIVIDER_ATTEMPTS} attempts"
    )))
}

fn commit<R>(
    growth: Growth,
    grid: &mut Grid,
    doors: &mut DoorSet,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Result<Divider, GenerationError>
where
    R: Rng + ?Sized,
{
    let Growth {
        axis, index, cells, ..
    } = growth;
    let (Some(&first), Some(&last), Some(&door)) = (cells.first(), cells.last(), cells.choose(rng))
    else {
        return Err(GenerationError::LayoutInfeasible(format!(
            "{axis} divider at {index} has no cells"
        )));
    };

    for &cell in &cells {
        if cell != door && !grid.occupy(cell, CellState::Wall) {
            return Err(GenerationError::LayoutInfeasible(format!(
                "divider cell ({}, {}) was taken while growing",
                cell.row(),
                cell.column()
            )));
        }
    }

    let mut divider = Divider::new(axis, index, first.along(axis), last.along(axis));
    divider.add_door(door);
    doors.record(axis, door);

    out.push(DrawOp::FillRegion {
        shape: Cuboid::between(first, last, PLAY_LEVEL),
        material: Material::Cobblestone,
    });
    out.push(DrawOp::FillRegion {
        shape: Cuboid::cell(door, PLAY_LEVEL),
        material: Material::Air,
    });

    Ok(divider)
}

/// Cuts a door into `existing` near `hit` on the side that has no door yet.
fn cut_collision_door<R>(
    existing: &mut Divider,
    hit: CellCoord,
    grid: &mut Grid,
    doors: &mut DoorSet,
    rng: &mut R,
    out: &mut Vec<DrawOp>,
) -> Option<CellCoord>
where
    R: Rng + ?Sized,
{
    let axis = existing.axis();
    let at = hit.along(axis);
    let before = existing.doors().iter().any(|door| door.along(axis) < at);
    let after = existing.doors().iter().any(|door| door.along(axis) > at);
    let side = match (before, after) {
        (true, true) => return None,
        (true, false) => Side::After,
        (false, true) => Side::Before,
        (false, false) if rng.gen_bool(0.5) => Side::Before,
        (false, false) => Side::After,
    };

    let span = existing.span();
    let candidates: Vec<CellCoord> = (1..=COLLISION_DOOR_REACH)
        .filter_map(|step| match side {
            Side::Before => at.checked_sub(step),
            Side::After => at.checked_add(step),
        })
        .filter(|position| span.contains(position))
        .map(|position| axis.cell_at(existing.index(), position))
        .filter(|&cell| grid.state(cell) == Some(CellState::Wall) && passable(grid, axis, cell))
        .collect();

    let door = candidates.choose(rng).copied()?;
    if !grid.breach(door) {
        return None;
    }

    existing.add_door(door);
    doors.record(axis, door);
    out.push(DrawOp::FillRegion {
        shape: Cuboid::cell(door, PLAY_LEVEL),
        material: Material::Air,
    });
    Some(door)
}

/// Reports whether both cells across a divider at `cell` are open floor.
fn passable(grid: &Grid, axis: Axis, cell: CellCoord) -> bool {
    let index = cell.across(axis);
    let position = cell.along(axis);
    match index.checked_sub(1) {
        Some(lower) => {
            grid.is_vacant(axis.cell_at(lower, position))
                && grid.is_vacant(axis.cell_at(index + 1, position))
        }
        None => false,
    }
}
