#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Occupancy grid and door bookkeeping shared by the arena generation systems.

use std::{collections::BTreeSet, fmt};

use hideseek_core::{Axis, CellCoord, CellState};

/// Dense `size × size` occupancy grid of the arena floor.
///
/// A cell leaves [`CellState::Empty`] exactly once. The only ways back are a
/// door breach ([`Grid::breach`]) and the agent reset used by whole-pass
/// spawn retries ([`Grid::clear_agents`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates an empty grid with `size` rows and columns.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            size,
            cells: vec![CellState::Empty; capacity],
        }
    }

    /// Number of rows (and columns) in the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.size && cell.column() < self.size
    }

    /// State of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell lies within the grid and is still empty.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.state(cell) == Some(CellState::Empty)
    }

    /// Moves an empty cell into `state`.
    ///
    /// Returns `false` and leaves the grid untouched when the cell is outside
    /// the grid, already occupied, or `state` is [`CellState::Empty`].
    #[must_use]
    pub fn occupy(&mut self, cell: CellCoord, state: CellState) -> bool {
        if state == CellState::Empty {
            return false;
        }
        match self.slot_mut(cell) {
            Some(slot) if *slot == CellState::Empty => {
                *slot = state;
                true
            }
            _ => false,
        }
    }

    /// Opens a door through a wall cell.
    ///
    /// Returns `false` when the cell is not a wall.
    #[must_use]
    pub fn breach(&mut self, cell: CellCoord) -> bool {
        match self.slot_mut(cell) {
            Some(slot) if *slot == CellState::Wall => {
                *slot = CellState::Empty;
                true
            }
            _ => false,
        }
    }

    /// Returns every agent cell to empty, reporting how many were cleared.
    pub fn clear_agents(&mut self) -> usize {
        let mut cleared = 0;
        for slot in &mut self.cells {
            if *slot == CellState::Agent {
                *slot = CellState::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let width = self.size;
        self.cells.iter().enumerate().map(move |(index, state)| {
            let index = index as u32;
            (CellCoord::new(index / width, index % width), *state)
        })
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        let width = usize::try_from(self.size).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }

    /// Number of cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|slot| **slot == state).count()
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut CellState> {
        self.index(cell).and_then(|index| self.cells.get_mut(index))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|state| state.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Indices already used as doorways, tracked per divider orientation.
///
/// Doors in vertical dividers are recorded by row, doors in horizontal
/// dividers by column. A new divider whose index matches a door on the
/// perpendicular orientation would run straight through that door.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoorSet {
    vertical: BTreeSet<u32>,
    horizontal: BTreeSet<u32>,
}

impl DoorSet {
    /// Records the door at `cell` cut into a divider laid on `axis`.
    pub fn record(&mut self, axis: Axis, cell: CellCoord) {
        let _ = self.entries_mut(axis).insert(cell.along(axis));
    }

    /// Reports whether a door on an `axis` divider sits at position `index`.
    #[must_use]
    pub fn contains(&self, axis: Axis, index: u32) -> bool {
        self.entries(axis).contains(&index)
    }

    /// Reports whether a new divider on `axis` at `index` would seal a door.
    #[must_use]
    pub fn blocks(&self, axis: Axis, index: u32) -> bool {
        self.contains(axis.perpendicular(), index)
    }

    fn entries(&self, axis: Axis) -> &BTreeSet<u32> {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn entries_mut(&mut self, axis: Axis) -> &mut BTreeSet<u32> {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}

/// Query functions that provide read-only views over a grid.
pub mod query {
    use std::collections::VecDeque;

    use hideseek_core::{CellCoord, CellState};

    use super::Grid;

    /// Counts empty cells accepted by `admits`.
    #[must_use]
    pub fn free_cells<F>(grid: &Grid, mut admits: F) -> usize
    where
        F: FnMut(CellCoord) -> bool,
    {
        grid.iter()
            .filter(|(cell, state)| *state == CellState::Empty && admits(*cell))
            .count()
    }

    /// Number of 4-connected regions of non-wall cells.
    #[must_use]
    pub fn open_regions(grid: &Grid) -> usize {
        let size = usize::try_from(grid.size()).unwrap_or(0);
        let mut visited = vec![false; grid.area()];
        let mut regions = 0;
        let mut queue = VecDeque::new();

        for (start, state) in grid.iter() {
            let start_index = flat_index(start, size);
            if state == CellState::Wall || visited[start_index] {
                continue;
            }

            regions += 1;
            visited[start_index] = true;
            queue.push_back(start);

            while let Some(cell) = queue.pop_front() {
                for neighbor in neighbors(grid, cell) {
                    let index = flat_index(neighbor, size);
                    if visited[index] || grid.state(neighbor) == Some(CellState::Wall) {
                        continue;
                    }
                    visited[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        regions
    }

    fn neighbors(grid: &Grid, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let row = cell.row();
        let column = cell.column();
        [
            row.checked_sub(1).map(|row| CellCoord::new(row, column)),
            Some(CellCoord::new(row + 1, column)),
            column.checked_sub(1).map(|column| CellCoord::new(row, column)),
            Some(CellCoord::new(row, column + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |neighbor| grid.contains(*neighbor))
    }

    fn flat_index(cell: CellCoord, size: usize) -> usize {
        cell.row() as usize * size + cell.column() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupy_only_moves_empty_cells() {
        let mut grid = Grid::new(4);
        let cell = CellCoord::new(1, 2);

        assert!(grid.occupy(cell, CellState::Wall));
        assert!(!grid.occupy(cell, CellState::Block));
        assert_eq!(grid.state(cell), Some(CellState::Wall));
        assert!(!grid.occupy(CellCoord::new(4, 0), CellState::Block));
        assert!(!grid.occupy(CellCoord::new(0, 0), CellState::Empty));
    }

    #[test]
    fn breach_only_opens_walls() {
        let mut grid = Grid::new(3);
        let wall = CellCoord::new(0, 1);
        let block = CellCoord::new(2, 2);
        assert!(grid.occupy(wall, CellState::Wall));
        assert!(grid.occupy(block, CellState::Block));

        assert!(grid.breach(wall));
        assert!(!grid.breach(wall));
        assert!(!grid.breach(block));
        assert!(grid.is_vacant(wall));
    }

    #[test]
    fn clear_agents_leaves_other_states() {
        let mut grid = Grid::new(3);
        assert!(grid.occupy(CellCoord::new(0, 0), CellState::Agent));
        assert!(grid.occupy(CellCoord::new(1, 1), CellState::Agent));
        assert!(grid.occupy(CellCoord::new(2, 2), CellState::Stair));

        assert_eq!(grid.clear_agents(), 2);
        assert_eq!(grid.count(CellState::Agent), 0);
        assert_eq!(grid.count(CellState::Stair), 1);
    }

    #[test]
    fn iter_reports_row_major_coordinates() {
        let grid = Grid::new(3);
        let cells: Vec<CellCoord> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells[0], CellCoord::new(0, 0));
        assert_eq!(cells[2], CellCoord::new(0, 2));
        assert_eq!(cells[3], CellCoord::new(1, 0));
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn display_renders_glyph_rows() {
        let mut grid = Grid::new(2);
        assert!(grid.occupy(CellCoord::new(0, 1), CellState::Wall));
        assert!(grid.occupy(CellCoord::new(1, 0), CellState::Agent));
        assert_eq!(grid.to_string(), ".#\nA.\n");
    }

    #[test]
    fn door_set_blocks_perpendicular_dividers() {
        let mut doors = DoorSet::default();
        doors.record(Axis::Vertical, CellCoord::new(6, 4));

        assert!(doors.contains(Axis::Vertical, 6));
        assert!(doors.blocks(Axis::Horizontal, 6));
        assert!(!doors.blocks(Axis::Vertical, 6));
        assert!(!doors.blocks(Axis::Horizontal, 4));
    }

    #[test]
    fn open_regions_counts_wall_separated_areas() {
        let mut grid = Grid::new(5);
        assert_eq!(query::open_regions(&grid), 1);

        for row in 0..5 {
            assert!(grid.occupy(CellCoord::new(row, 2), CellState::Wall));
        }
        assert_eq!(query::open_regions(&grid), 2);

        assert!(grid.breach(CellCoord::new(3, 2)));
        assert_eq!(query::open_regions(&grid), 1);
    }
}
