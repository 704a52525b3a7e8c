//! Terminal input mapping.
//!
//! Turns crossterm key and mouse events into discrete
//! [`GameAction`](crate::types::GameAction)s. There is no repeat handling:
//! gravity comes from the driver's step timer and every key press is one
//! engine command.

pub mod map;

pub use tile_tetris_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
