//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal view, input mapping, driver).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 30 rows (indexed 0-29, top to bottom)
//! - **Spawn anchor**: (3, 0), the top-left corner of a piece's 4x4 box
//!
//! # Coordinates
//!
//! [`Coordinates`] is used for both *local* offsets (relative to a parent tile)
//! and *world* positions (absolute board cells). The representation is the
//! same; only the meaning differs.
//!
//! # Examples
//!
//! ```
//! use tile_tetris_types::{Coordinates, Direction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let anchor = Coordinates::new(3, 0);
//! let offset = Coordinates::new(1, 2);
//! assert_eq!(anchor + offset, Coordinates::new(4, 2));
//!
//! assert_eq!(Direction::Left.dx(), -1);
//! assert_eq!(ShapeKind::I.as_str(), "I");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 30);
//! ```

use std::ops::{Add, Sub};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (30 rows)
pub const BOARD_HEIGHT: u8 = 30;

/// Side length of the bounding box every shape is defined in.
pub const SHAPE_BOX: i32 = 4;

/// Number of tiles in every tetromino.
pub const TETROMINO_TILES: usize = 4;

/// Board anchor of a freshly spawned piece's root tile.
pub const SPAWN_POSITION: Coordinates = Coordinates { x: 3, y: 0 };

/// Default gravity cadence in milliseconds (one row per second).
pub const DEFAULT_STEP_MS: u64 = 1000;

/// An (x, y) integer pair, either a local offset or a world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate a local offset 90° inside the 4x4 shape box: `(x, y) -> (3 - y, x)`.
    pub const fn rotated(self) -> Self {
        Self {
            x: SHAPE_BOX - 1 - self.y,
            y: self.x,
        }
    }

    /// True if the position lies on the board.
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i32 && self.y >= 0 && self.y < BOARD_HEIGHT as i32
    }
}

impl Add for Coordinates {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinates {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Coordinates {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Display tag carried by every tile.
///
/// The engine never inspects it; it is passed through untouched for the
/// rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// The seven fixed shapes
///
/// Table order (and therefore the order a uniform draw indexes into):
/// - **O**: 2x2 square, yellow
/// - **I**: 4-long bar (horizontal at spawn), cyan
/// - **L**: vertical bar with a foot to the right, orange
/// - **J**: vertical bar with a cap to the right, blue
/// - **T**: vertical bar with a nub to the right, purple
/// - **S**: vertical S, green
/// - **Z**: vertical Z, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O,
    I,
    L,
    J,
    T,
    S,
    Z,
}

impl ShapeKind {
    /// All shapes in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Single-letter display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::O => "O",
            ShapeKind::I => "I",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
        }
    }

    /// Display color associated with the shape.
    pub fn color(&self) -> TileColor {
        match self {
            ShapeKind::O => TileColor::Yellow,
            ShapeKind::I => TileColor::Cyan,
            ShapeKind::L => TileColor::Orange,
            ShapeKind::J => TileColor::Blue,
            ShapeKind::T => TileColor::Purple,
            ShapeKind::S => TileColor::Green,
            ShapeKind::Z => TileColor::Red,
        }
    }
}

/// Lateral movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column offset of one move in this direction.
    pub fn dx(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Result of a speculative move or rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved; the new position is committed.
    Free,
    /// The move collided and was rolled back (or no piece could move).
    Blocked,
}

impl MoveOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, MoveOutcome::Blocked)
    }
}

/// Result of spawning a new piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The new piece collided at the spawn anchor.
    GameOver,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Falling,
    /// The piece landed, rows were cleared, and a new piece spawned.
    Landed { rows_cleared: u8 },
    /// The game is over (either just now or already).
    GameOver,
}

impl StepOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepOutcome::GameOver)
    }
}

/// Discrete commands a driver can issue
///
/// These are produced by the input mapping and by the step timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90°
    Rotate,
    /// Apply one gravity step
    Step,
    /// Step until the piece lands
    Drop,
    /// Slide the piece towards a board column
    SetColumn(i32),
}
