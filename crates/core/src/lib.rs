//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole rules engine. It has no dependencies on the
//! terminal or on wall-clock time: the driver decides when gravity fires.
//!
//! # Module Structure
//!
//! - [`tile`]: tile arena with parent/child links and derived world coordinates
//! - [`shapes`]: the seven shape offset tables
//! - [`tetromino`]: the falling piece as a root tile with four children
//! - [`board`]: 10x30 grid of landed tiles with cascading row clears
//! - [`rng`]: shape sources (seeded LCG and fixed sequences)
//! - [`game`]: move/rotate/step/drop with rollback on collision
//! - [`snapshot`]: plain-data view of a game for renderers
//!
//! # Example
//!
//! ```
//! use tile_tetris_core::Game;
//! use tile_tetris_types::{GameAction, StepOutcome};
//!
//! let mut game = Game::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//!
//! let first = game.piece_id();
//! assert!(matches!(game.drop(), StepOutcome::Landed { .. }));
//! assert_eq!(game.piece_id(), first + 1);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod game;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod tetromino;
pub mod tile;

pub use tile_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, ClearedRows};
pub use game::{Game, GameOverObserver};
pub use rng::{FixedShapes, ShapeSource, SimpleRng};
pub use shapes::{get_shape, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetromino::Tetromino;
pub use tile::{Tile, TileArena, TileId};
