//! Tile Tetris (workspace facade crate).
//!
//! Re-exports the engine and its terminal collaborators under one name
//! (`tile_tetris::{core, input, term, types}`) and hosts the driver
//! configuration used by the binary.

pub mod config;

pub use tile_tetris_core as core;
pub use tile_tetris_input as input;
pub use tile_tetris_term as term;
pub use tile_tetris_types as types;

pub use config::{parse_args, DriverConfig};
