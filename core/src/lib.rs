#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the hide-and-seek arena generator.
//!
//! This crate defines the vocabulary that connects the occupancy grid, the
//! pure generation systems and the adapters. Systems consume a
//! [`LayoutRequest`], mutate a grid owned by the caller and append
//! [`DrawOp`] values describing the static geometry in the order the
//! simulator must apply them. Adapters translate those operations into the
//! simulator's world-description format without ever reaching back into the
//! systems.

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// World height of the floor layer.
pub const FLOOR_LEVEL: i32 = 1;

/// World height at which walls, items and agents stand.
pub const PLAY_LEVEL: i32 = 2;

/// Smallest quadrant room edge drawn when the caller leaves the size open.
pub const MIN_QUADRANT_ROOM_SIZE: u32 = 3;

/// Room count used when a divider strategy is selected by tag alone.
pub const DEFAULT_ROOM_COUNT: u32 = 3;

/// Classification of a single arena cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Open floor.
    #[default]
    Empty,
    /// Part of a room wall or divider.
    Wall,
    /// Pushable block item.
    Block,
    /// Stair item.
    Stair,
    /// Agent spawn point.
    Agent,
}

impl CellState {
    /// Numeric code used when exporting the grid.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Wall => 1,
            Self::Block => 2,
            Self::Stair => 3,
            Self::Agent => 4,
        }
    }

    /// Single character glyph used by text renderings of the grid.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Block => 'B',
            Self::Stair => 'S',
            Self::Agent => 'A',
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Rows map to the simulator's `z` axis and columns to its `x` axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }

    /// Position of the cell along the run of a divider laid on `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.row,
            Axis::Horizontal => self.column,
        }
    }

    /// Position of the cell across a divider laid on `axis`.
    #[must_use]
    pub const fn across(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.column,
            Axis::Horizontal => self.row,
        }
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Number of cells covered by the rectangle.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.size.width * self.size.height
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row >= self.origin.row
            && cell.row < self.origin.row + self.size.height
            && cell.column >= self.origin.column
            && cell.column < self.origin.column + self.size.width
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Orientation of a divider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Occupies a single column and runs along the rows.
    Vertical,
    /// Occupies a single row and runs along the columns.
    Horizontal,
}

impl Axis {
    /// Returns the orientation at right angles to this one.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Cell found `position` steps along a divider placed at `index`.
    #[must_use]
    pub const fn cell_at(self, index: u32, position: u32) -> CellCoord {
        match self {
            Self::Vertical => CellCoord::new(position, index),
            Self::Horizontal => CellCoord::new(index, position),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Arena corner that hosts a quadrant room.
///
/// ```text
/// 0 1
/// 2 3
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, last column.
    TopRight,
    /// Last row, column 0.
    BottomLeft,
    /// Last row, last column.
    BottomRight,
}

impl Corner {
    /// Every corner in reading order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Reports whether the corner touches row 0.
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Reports whether the corner touches column 0.
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }
}

/// Parameters of a quadrant room; omitted values are drawn at generation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantParams {
    /// Corner hosting the room.
    #[serde(default)]
    pub corner: Option<Corner>,
    /// Edge length of the room interior, excluding its walls.
    #[serde(default)]
    pub room_size: Option<u32>,
    /// Number of doors, either one or two.
    #[serde(default)]
    pub door_count: Option<u8>,
}

/// Room-shape strategy selected for a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RoomStrategy {
    /// One rectangular room in a corner of the arena.
    Quadrant(QuadrantParams),
    /// Alternating dividers that each carry one door.
    Sequential {
        /// Number of rooms to produce; `room_count - 1` dividers are placed.
        #[serde(default = "default_room_count")]
        room_count: u32,
    },
    /// Dividers that cut a second door into any divider they run into.
    Parallel {
        /// Number of rooms to produce; `room_count - 1` dividers are placed.
        #[serde(default = "default_room_count")]
        room_count: u32,
    },
}

impl RoomStrategy {
    /// Resolves a strategy from its textual tag using default parameters.
    pub fn from_tag(tag: &str) -> Result<Self, GenerationError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "quadrant" => Ok(Self::Quadrant(QuadrantParams::default())),
            "sequential" => Ok(Self::Sequential {
                room_count: DEFAULT_ROOM_COUNT,
            }),
            "parallel" => Ok(Self::Parallel {
                room_count: DEFAULT_ROOM_COUNT,
            }),
            other => Err(GenerationError::InvalidParameters(format!(
                "room strategy '{other}' is not supported"
            ))),
        }
    }

    /// Textual tag of the strategy.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Quadrant(_) => "quadrant",
            Self::Sequential { .. } => "sequential",
            Self::Parallel { .. } => "parallel",
        }
    }
}

const fn default_room_count() -> u32 {
    DEFAULT_ROOM_COUNT
}

impl Default for RoomStrategy {
    fn default() -> Self {
        Self::Quadrant(QuadrantParams::default())
    }
}

/// Region of the arena an item kind may be placed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Any cell of the arena.
    Anywhere,
    /// Cells inside the quadrant room.
    Inside,
    /// Cells outside the quadrant room.
    Outside,
    /// No cell at all.
    Nowhere,
}

impl Region {
    /// Combines inside/outside toggles into a region.
    #[must_use]
    pub const fn from_flags(inside: bool, outside: bool) -> Self {
        match (inside, outside) {
            (true, true) => Self::Anywhere,
            (true, false) => Self::Inside,
            (false, true) => Self::Outside,
            (false, false) => Self::Nowhere,
        }
    }

    /// Reports whether the region admits `cell` given the layout's quadrant room.
    ///
    /// Without a quadrant room no cell counts as inside.
    #[must_use]
    pub fn admits(self, cell: CellCoord, quadrant: Option<&QuadrantRoom>) -> bool {
        match self {
            Self::Anywhere => true,
            Self::Inside => quadrant.is_some_and(|room| room.contains(cell)),
            Self::Outside => !quadrant.is_some_and(|room| room.contains(cell)),
            Self::Nowhere => false,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Anywhere => "anywhere",
            Self::Inside => "inside the quadrant room",
            Self::Outside => "outside the quadrant room",
            Self::Nowhere => "nowhere",
        };
        f.write_str(label)
    }
}

/// Rules that dictate where blocks and stairs may be generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemGenRules {
    /// Toggles block generation inside the quadrant room.
    pub blocks_inside: bool,
    /// Toggles block generation outside the quadrant room.
    pub blocks_outside: bool,
    /// Toggles stair generation inside the quadrant room.
    pub stairs_inside: bool,
    /// Toggles stair generation outside the quadrant room.
    pub stairs_outside: bool,
}

impl ItemGenRules {
    /// Region blocks may be placed into.
    #[must_use]
    pub const fn block_region(&self) -> Region {
        Region::from_flags(self.blocks_inside, self.blocks_outside)
    }

    /// Region stairs may be placed into.
    #[must_use]
    pub const fn stair_region(&self) -> Region {
        Region::from_flags(self.stairs_inside, self.stairs_outside)
    }

    /// Region a given item kind may be placed into.
    #[must_use]
    pub const fn region_for(&self, kind: ItemKind) -> Region {
        match kind {
            ItemKind::Block => self.block_region(),
            ItemKind::Stair => self.stair_region(),
        }
    }
}

impl Default for ItemGenRules {
    fn default() -> Self {
        Self {
            blocks_inside: true,
            blocks_outside: true,
            stairs_inside: true,
            stairs_outside: true,
        }
    }
}

/// Kinds of items scattered across the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A block agents can push or stack.
    Block,
    /// A stair agents can climb.
    Stair,
}

impl ItemKind {
    /// Grid state recorded for a placed item.
    #[must_use]
    pub const fn cell_state(self) -> CellState {
        match self {
            Self::Block => CellState::Block,
            Self::Stair => CellState::Stair,
        }
    }

    /// Material drawn for a placed item.
    #[must_use]
    pub const fn material(self) -> Material {
        match self {
            Self::Block => Material::Planks,
            Self::Stair => Material::OakStairs,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Stair => write!(f, "stair"),
        }
    }
}

/// Materials understood by the simulator's drawing decorator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Terrain surrounding the arena.
    Grass,
    /// Empty space; used to carve openings.
    Air,
    /// Arena floor.
    IronBlock,
    /// Outer arena wall.
    StoneBrick,
    /// Room walls and dividers.
    Cobblestone,
    /// Block items.
    Planks,
    /// Stair items.
    OakStairs,
}

impl Material {
    /// Block type identifier used by the simulator.
    #[must_use]
    pub const fn block_type(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Air => "air",
            Self::IronBlock => "iron_block",
            Self::StoneBrick => "stonebrick",
            Self::Cobblestone => "cobblestone",
            Self::Planks => "planks",
            Self::OakStairs => "oak_stairs",
        }
    }
}

/// Axis-aligned box of world blocks, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cuboid {
    /// Lower `x` bound.
    pub x1: i32,
    /// Lower `y` bound.
    pub y1: i32,
    /// Lower `z` bound.
    pub z1: i32,
    /// Upper `x` bound.
    pub x2: i32,
    /// Upper `y` bound.
    pub y2: i32,
    /// Upper `z` bound.
    pub z2: i32,
}

impl Cuboid {
    /// Creates a cuboid spanning the provided inclusive ranges.
    #[must_use]
    pub fn spanning(x: RangeInclusive<i32>, y: RangeInclusive<i32>, z: RangeInclusive<i32>) -> Self {
        Self {
            x1: *x.start(),
            y1: *y.start(),
            z1: *z.start(),
            x2: *x.end(),
            y2: *y.end(),
            z2: *z.end(),
        }
    }

    /// Creates a one-block-high cuboid covering the cells between `from` and `to`.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord, level: i32) -> Self {
        let (x1, x2) = ordered(world_axis(from.column), world_axis(to.column));
        let (z1, z2) = ordered(world_axis(from.row), world_axis(to.row));
        Self {
            x1,
            y1: level,
            z1,
            x2,
            y2: level,
            z2,
        }
    }

    /// Creates a cuboid covering a single cell.
    #[must_use]
    pub fn cell(cell: CellCoord, level: i32) -> Self {
        Self::between(cell, cell, level)
    }
}

fn world_axis(index: u32) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Drawing operation applied to the simulator world in listed order.
///
/// Later operations override earlier ones where they overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Fills a cuboid with a material.
    FillRegion {
        /// Region being filled.
        shape: Cuboid,
        /// Material written into the region.
        material: Material,
    },
    /// Places a single item on top of the floor.
    PlaceItem {
        /// Cell receiving the item.
        cell: CellCoord,
        /// Material of the item.
        material: Material,
    },
}

impl DrawOp {
    /// Material written by the operation.
    #[must_use]
    pub const fn material(&self) -> Material {
        match self {
            Self::FillRegion { material, .. } | Self::PlaceItem { material, .. } => *material,
        }
    }
}

/// Resolved geometry of a quadrant room.
///
/// The top-left formula is canonical: the interior spans rows and columns
/// `0..room_size` and the walls sit on row and column `room_size`. The other
/// corners mirror it against `arena_size - 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantRoom {
    corner: Corner,
    room_size: u32,
    arena_size: u32,
    doors: Vec<CellCoord>,
}

impl QuadrantRoom {
    /// Creates the geometry of a room without doors.
    ///
    /// Callers must ensure `room_size + 2 <= arena_size`.
    #[must_use]
    pub fn new(corner: Corner, room_size: u32, arena_size: u32) -> Self {
        Self {
            corner,
            room_size,
            arena_size,
            doors: Vec::new(),
        }
    }

    /// Corner hosting the room.
    #[must_use]
    pub const fn corner(&self) -> Corner {
        self.corner
    }

    /// Edge length of the room interior.
    #[must_use]
    pub const fn room_size(&self) -> u32 {
        self.room_size
    }

    /// Door cells cut into the room walls.
    #[must_use]
    pub fn doors(&self) -> &[CellCoord] {
        &self.doors
    }

    /// Records a door cell.
    pub fn add_door(&mut self, cell: CellCoord) {
        self.doors.push(cell);
    }

    /// Row holding the horizontal wall.
    #[must_use]
    pub const fn wall_row(&self) -> u32 {
        if self.corner.is_top() {
            self.room_size
        } else {
            self.arena_size - 1 - self.room_size
        }
    }

    /// Column holding the vertical wall.
    #[must_use]
    pub const fn wall_column(&self) -> u32 {
        if self.corner.is_left() {
            self.room_size
        } else {
            self.arena_size - 1 - self.room_size
        }
    }

    /// Rows covered by the room interior.
    #[must_use]
    pub fn interior_rows(&self) -> RangeInclusive<u32> {
        if self.corner.is_top() {
            0..=self.room_size - 1
        } else {
            self.arena_size - self.room_size..=self.arena_size - 1
        }
    }

    /// Columns covered by the room interior.
    #[must_use]
    pub fn interior_columns(&self) -> RangeInclusive<u32> {
        if self.corner.is_left() {
            0..=self.room_size - 1
        } else {
            self.arena_size - self.room_size..=self.arena_size - 1
        }
    }

    /// Bounding box of the room interior.
    #[must_use]
    pub fn interior(&self) -> CellRect {
        CellRect::from_origin_and_size(
            CellCoord::new(*self.interior_rows().start(), *self.interior_columns().start()),
            CellRectSize::new(self.room_size, self.room_size),
        )
    }

    /// Reports whether `cell` lies inside the room interior.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        let wall_row = self.wall_row();
        let wall_column = self.wall_column();
        match self.corner {
            Corner::TopLeft => cell.row < wall_row && cell.column < wall_column,
            Corner::TopRight => cell.row < wall_row && cell.column > wall_column,
            Corner::BottomLeft => cell.row > wall_row && cell.column < wall_column,
            Corner::BottomRight => cell.row > wall_row && cell.column > wall_column,
        }
    }

    /// Cell shared by both walls.
    #[must_use]
    pub const fn corner_cell(&self) -> CellCoord {
        CellCoord::new(self.wall_row(), self.wall_column())
    }

    /// Cells of the horizontal wall, including the shared corner cell.
    #[must_use]
    pub fn horizontal_wall(&self) -> Vec<CellCoord> {
        let row = self.wall_row();
        let columns = if self.corner.is_left() {
            0..=self.wall_column()
        } else {
            self.wall_column()..=self.arena_size - 1
        };
        columns.map(|column| CellCoord::new(row, column)).collect()
    }

    /// Cells of the vertical wall, including the shared corner cell.
    #[must_use]
    pub fn vertical_wall(&self) -> Vec<CellCoord> {
        let column = self.wall_column();
        let rows = if self.corner.is_top() {
            0..=self.wall_row()
        } else {
            self.wall_row()..=self.arena_size - 1
        };
        rows.map(|row| CellCoord::new(row, column)).collect()
    }

    /// Cells of the wall on `axis` that open directly onto the interior.
    #[must_use]
    pub fn door_candidates(&self, axis: Axis) -> Vec<CellCoord> {
        match axis {
            Axis::Horizontal => self
                .interior_columns()
                .map(|column| CellCoord::new(self.wall_row(), column))
                .collect(),
            Axis::Vertical => self
                .interior_rows()
                .map(|row| CellCoord::new(row, self.wall_column()))
                .collect(),
        }
    }
}

/// Wall segment partitioning the arena into rooms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    axis: Axis,
    index: u32,
    first: u32,
    last: u32,
    doors: Vec<CellCoord>,
}

impl Divider {
    /// Creates a divider occupying positions `first..=last` at `index`.
    #[must_use]
    pub fn new(axis: Axis, index: u32, first: u32, last: u32) -> Self {
        Self {
            axis,
            index,
            first: first.min(last),
            last: first.max(last),
            doors: Vec::new(),
        }
    }

    /// Orientation of the divider.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Column (vertical) or row (horizontal) the divider occupies.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Inclusive range of positions covered along the divider's run.
    #[must_use]
    pub const fn span(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Number of cells covered, doors included.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Every cell covered by the divider, doors included.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.span()
            .map(move |position| self.axis.cell_at(self.index, position))
    }

    /// Reports whether the divider covers `cell`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.across(self.axis) == self.index && self.span().contains(&cell.along(self.axis))
    }

    /// Door cells cut into the divider.
    #[must_use]
    pub fn doors(&self) -> &[CellCoord] {
        &self.doors
    }

    /// Records a door cell.
    pub fn add_door(&mut self, cell: CellCoord) {
        self.doors.push(cell);
    }
}

/// Rooms produced by the selected strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoomLayout {
    /// A single corner room.
    Quadrant {
        /// Geometry and doors of the room.
        room: QuadrantRoom,
    },
    /// Rooms separated by dividers.
    Dividers {
        /// Dividers in placement order.
        dividers: Vec<Divider>,
    },
}

impl RoomLayout {
    /// Quadrant room of the layout, if any.
    #[must_use]
    pub const fn quadrant(&self) -> Option<&QuadrantRoom> {
        match self {
            Self::Quadrant { room } => Some(room),
            Self::Dividers { .. } => None,
        }
    }

    /// Dividers of the layout; empty for quadrant layouts.
    #[must_use]
    pub fn dividers(&self) -> &[Divider] {
        match self {
            Self::Quadrant { .. } => &[],
            Self::Dividers { dividers } => dividers.as_slice(),
        }
    }
}

/// Complete description of an arena to generate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRequest {
    /// Edge length of the square play area, excluding the outer wall.
    pub arena_size: u32,
    /// Surrounds the play area with a solid wall when set.
    pub is_closed_arena: bool,
    /// Room-shape strategy.
    pub room_strategy: RoomStrategy,
    /// Placement regions for blocks and stairs.
    pub item_rules: ItemGenRules,
    /// Number of blocks to place.
    pub num_blocks: u32,
    /// Number of stairs to place.
    pub num_stairs: u32,
    /// Minimum Chebyshev separation between agent spawns.
    pub min_agent_spawn_distance: u32,
    /// Number of agent spawn points to place.
    pub num_agents: u32,
}

impl LayoutRequest {
    /// Checks the request for parameter errors that no amount of retrying fixes.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.arena_size == 0 {
            return Err(GenerationError::InvalidParameters(
                "arena size must be positive".to_owned(),
            ));
        }

        match self.room_strategy {
            RoomStrategy::Quadrant(params) => {
                if let Some(room_size) = params.room_size {
                    if room_size == 0 || room_size.saturating_add(2) > self.arena_size {
                        return Err(GenerationError::InvalidParameters(format!(
                            "quadrant room size {room_size} does not fit an arena of size {}",
                            self.arena_size
                        )));
                    }
                }
                if let Some(door_count) = params.door_count {
                    if !(1..=2).contains(&door_count) {
                        return Err(GenerationError::InvalidParameters(format!(
                            "quadrant rooms take one or two doors, not {door_count}"
                        )));
                    }
                }
            }
            RoomStrategy::Sequential { room_count } | RoomStrategy::Parallel { room_count } => {
                if room_count == 0 {
                    return Err(GenerationError::InvalidParameters(
                        "room count must be positive".to_owned(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            arena_size: 10,
            is_closed_arena: true,
            room_strategy: RoomStrategy::default(),
            item_rules: ItemGenRules::default(),
            num_blocks: 5,
            num_stairs: 3,
            min_agent_spawn_distance: 2,
            num_agents: 2,
        }
    }
}

/// Reasons a layout request may fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request is malformed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Rooms or dividers could not be placed within the retry budget.
    #[error("layout infeasible: {0}")]
    LayoutInfeasible(String),
    /// More cells were requested than the region can hold.
    #[error("{requested} {subject} requested {region} but only {available} cells are free")]
    CapacityExceeded {
        /// What was being placed.
        subject: &'static str,
        /// Number of cells requested.
        requested: u32,
        /// Number of free cells in the region.
        available: u32,
        /// Region the request was restricted to.
        region: Region,
    },
    /// Rejection sampling exhausted its attempt budget.
    #[error("placed {placed} of {requested} {item} items before the sampling budget ran out")]
    PlacementFailed {
        /// Kind of item being placed.
        item: ItemKind,
        /// Items placed before the failure.
        placed: u32,
        /// Items requested.
        requested: u32,
    },
    /// Agent spawns could not be separated within the retry budget.
    #[error("could not spawn {agents} agents after {passes} placement passes")]
    SpawnPlacementFailed {
        /// Number of agents requested.
        agents: u32,
        /// Whole placement passes attempted.
        passes: u32,
    },
}
