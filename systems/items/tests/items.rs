use std::collections::HashSet;

use hideseek_core::{
    CellState, Corner, DrawOp, GenerationError, ItemGenRules, Material, QuadrantParams, Region,
    RoomStrategy,
};
use hideseek_system_items::{place, Config};
use hideseek_system_rooms::lay_out;
use hideseek_world::{DoorSet, Grid};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BLOCKS_INSIDE_ONLY: ItemGenRules = ItemGenRules {
    blocks_inside: true,
    blocks_outside: false,
    stairs_inside: true,
    stairs_outside: true,
};

fn quadrant_grid(corner: Corner, seed: u64) -> (Grid, hideseek_core::RoomLayout, ChaCha8Rng) {
    let mut grid = Grid::new(10);
    let mut doors = DoorSet::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::new();
    let strategy = RoomStrategy::Quadrant(QuadrantParams {
        corner: Some(corner),
        room_size: Some(4),
        door_count: Some(1),
    });
    let layout = lay_out(&strategy, &mut grid, &mut doors, &mut rng, &mut ops).expect("rooms");
    (grid, layout, rng)
}

#[test]
fn blocks_restricted_inside_land_in_the_room() {
    for (seed, corner) in Corner::ALL.into_iter().enumerate() {
        let (mut grid, layout, mut rng) = quadrant_grid(corner, seed as u64);
        let room = layout.quadrant().expect("quadrant room");
        let mut ops = Vec::new();

        place(
            &Config::new(BLOCKS_INSIDE_ONLY, 6, 3),
            Some(room),
            &mut grid,
            &mut rng,
            &mut ops,
        )
        .expect("items placed");

        let blocks: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::PlaceItem {
                    cell,
                    material: Material::Planks,
                } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(blocks.len(), 6);
        for cell in blocks {
            assert!(room.interior().contains(cell), "{corner:?} block at {cell:?}");
            assert_eq!(grid.state(cell), Some(CellState::Block));
        }
        assert_eq!(grid.count(CellState::Stair), 3);
    }
}

#[test]
fn placements_never_share_a_cell() {
    let mut grid = Grid::new(6);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut ops = Vec::new();

    place(
        &Config::new(ItemGenRules::default(), 20, 16),
        None,
        &mut grid,
        &mut rng,
        &mut ops,
    )
    .expect("items placed");

    let cells: HashSet<_> = ops
        .iter()
        .map(|op| match op {
            DrawOp::PlaceItem { cell, .. } => *cell,
            other => panic!("unexpected operation: {other:?}"),
        })
        .collect();
    assert_eq!(cells.len(), 36);
    assert_eq!(grid.count(CellState::Empty), 0);
    assert!(matches!(ops[0], DrawOp::PlaceItem { material: Material::Planks, .. }));
    assert!(matches!(ops[35], DrawOp::PlaceItem { material: Material::OakStairs, .. }));
}

#[test]
fn oversized_requests_fail_before_sampling() {
    let mut grid = Grid::new(5);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut untouched = ChaCha8Rng::seed_from_u64(4);
    let mut ops = Vec::new();

    let result = place(
        &Config::new(ItemGenRules::default(), 26, 0),
        None,
        &mut grid,
        &mut rng,
        &mut ops,
    );

    assert_eq!(
        result,
        Err(GenerationError::CapacityExceeded {
            subject: "blocks",
            requested: 26,
            available: 25,
            region: Region::Anywhere,
        })
    );
    assert!(ops.is_empty());
    assert_eq!(grid.count(CellState::Empty), 25);
    assert_eq!(rng.next_u64(), untouched.next_u64());
}

#[test]
fn inside_region_without_a_room_has_no_capacity() {
    let mut grid = Grid::new(8);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut ops = Vec::new();

    let result = place(
        &Config::new(BLOCKS_INSIDE_ONLY, 1, 0),
        None,
        &mut grid,
        &mut rng,
        &mut ops,
    );
    assert!(matches!(
        result,
        Err(GenerationError::CapacityExceeded {
            available: 0,
            region: Region::Inside,
            ..
        })
    ));
}

#[test]
fn disabled_regions_accept_zero_items() {
    let rules = ItemGenRules {
        stairs_inside: false,
        stairs_outside: false,
        ..ItemGenRules::default()
    };
    let mut grid = Grid::new(6);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut ops = Vec::new();

    place(&Config::new(rules, 4, 0), None, &mut grid, &mut rng, &mut ops).expect("blocks only");
    assert_eq!(ops.len(), 4);

    let result = place(&Config::new(rules, 0, 1), None, &mut grid, &mut rng, &mut ops);
    assert!(matches!(
        result,
        Err(GenerationError::CapacityExceeded {
            subject: "stairs",
            region: Region::Nowhere,
            ..
        })
    ));
}

#[test]
fn room_capacity_excludes_occupied_cells() {
    let (mut grid, layout, mut rng) = quadrant_grid(Corner::BottomLeft, 21);
    let room = layout.quadrant().expect("quadrant room");
    let mut ops = Vec::new();

    let result = place(
        &Config::new(BLOCKS_INSIDE_ONLY, 17, 0),
        Some(room),
        &mut grid,
        &mut rng,
        &mut ops,
    );
    assert!(matches!(
        result,
        Err(GenerationError::CapacityExceeded {
            requested: 17,
            available: 16,
            ..
        })
    ));
}
