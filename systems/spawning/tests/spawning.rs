use std::time::{Duration, Instant};

use hideseek_core::{CellCoord, CellState, GenerationError, Region};
use hideseek_system_spawning::{packing_limit, Config, Spawning, MAX_SPAWN_PASSES};
use hideseek_world::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spawn(grid: &mut Grid, agents: u32, distance: u32, seed: u64) -> Result<Vec<CellCoord>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut spawns = Vec::new();
    Spawning::new(Config::new(agents, distance)).place(grid, &mut rng, &mut spawns)?;
    Ok(spawns)
}

#[test]
fn spawns_keep_their_distance() {
    for seed in 0..32 {
        let mut grid = Grid::new(12);
        let spawns = spawn(&mut grid, 4, 2, seed).expect("agents spawned");

        assert_eq!(spawns.len(), 4);
        assert_eq!(grid.count(CellState::Agent), 4);
        for (index, first) in spawns.iter().enumerate() {
            assert_eq!(grid.state(*first), Some(CellState::Agent));
            for second in &spawns[index + 1..] {
                assert!(
                    first.chebyshev_distance(*second) > 2,
                    "{first:?} and {second:?} are too close"
                );
            }
        }
    }
}

#[test]
fn spawns_avoid_occupied_cells() {
    let mut grid = Grid::new(4);
    for row in 0..4 {
        for column in 0..3 {
            assert!(grid.occupy(CellCoord::new(row, column), CellState::Wall));
        }
    }

    let spawns = spawn(&mut grid, 2, 1, 17).expect("agents spawned");
    for cell in spawns {
        assert_eq!(cell.column(), 3);
    }
}

#[test]
fn more_agents_than_free_cells_is_a_capacity_error() {
    let mut grid = Grid::new(2);
    assert!(grid.occupy(CellCoord::new(0, 0), CellState::Block));

    let result = spawn(&mut grid, 4, 0, 1);
    assert_eq!(
        result,
        Err(GenerationError::CapacityExceeded {
            subject: "agents",
            requested: 4,
            available: 3,
            region: Region::Anywhere,
        })
    );
    assert_eq!(grid.count(CellState::Agent), 0);
}

#[test]
fn separation_beyond_the_arena_fails_before_sampling() {
    let mut grid = Grid::new(32);
    let started = Instant::now();
    let result = spawn(&mut grid, 2, 32, 5);

    assert_eq!(
        result,
        Err(GenerationError::CapacityExceeded {
            subject: "agents",
            requested: 2,
            available: 1,
            region: Region::Anywhere,
        })
    );
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(grid.count(CellState::Agent), 0);
}

#[test]
fn separation_bound_counts_one_agent_per_run_of_cells() {
    let mut grid = Grid::new(9);
    let result = spawn(&mut grid, 10, 2, 8);

    assert_eq!(
        result,
        Err(GenerationError::CapacityExceeded {
            subject: "agents",
            requested: 10,
            available: packing_limit(9, 2),
            region: Region::Anywhere,
        })
    );
}

#[test]
fn walls_that_split_the_spawn_area_exhaust_every_pass() {
    let mut grid = Grid::new(4);
    for row in 0..4 {
        for column in 0..3 {
            assert!(grid.occupy(CellCoord::new(row, column), CellState::Wall));
        }
    }

    let result = spawn(&mut grid, 3, 1, 5);
    assert_eq!(
        result,
        Err(GenerationError::SpawnPlacementFailed {
            agents: 3,
            passes: MAX_SPAWN_PASSES,
        })
    );
    assert_eq!(grid.count(CellState::Agent), 0);
}

#[test]
fn same_seed_places_the_same_spawns() {
    let mut first_grid = Grid::new(10);
    let mut second_grid = Grid::new(10);
    let first = spawn(&mut first_grid, 3, 2, 0x5eed).expect("first run");
    let second = spawn(&mut second_grid, 3, 2, 0x5eed).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn no_agents_is_a_no_op() {
    let mut grid = Grid::new(1);
    assert!(spawn(&mut grid, 0, 5, 0).expect("nothing to place").is_empty());
}
