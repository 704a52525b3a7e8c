//! Terminal rendering for the tile game.
//!
//! The view draws a [`core::GameSnapshot`] into a plain framebuffer (no I/O),
//! and [`TerminalRenderer`] flushes framebuffers to the real terminal through
//! crossterm. Board cells are drawn 2 columns wide by default to keep them
//! roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_tetris_core as core;
pub use tile_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
