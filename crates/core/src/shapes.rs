//! Shapes module - the seven fixed tetromino descriptors
//!
//! Each shape is four local offsets inside a 4x4 box plus a display color.
//! Pieces spawn with their root tile at [`SPAWN_POSITION`].

use crate::types::{Coordinates, ShapeKind, TileColor, TETROMINO_TILES};

pub use crate::types::SPAWN_POSITION;

/// Offset of a single tile relative to the piece root
pub type TileOffset = (i32, i32);

/// Shape of a piece - 4 tile offsets from the piece root
pub type ShapeOffsets = [TileOffset; TETROMINO_TILES];

/// A shape descriptor: offsets plus color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub offsets: ShapeOffsets,
    pub color: TileColor,
}

impl Shape {
    /// Offsets as [`Coordinates`].
    pub fn coordinates(&self) -> [Coordinates; TETROMINO_TILES] {
        self.offsets.map(Coordinates::from)
    }
}

/// Get the spawn shape for a kind
pub fn get_shape(kind: ShapeKind) -> Shape {
    Shape {
        kind,
        offsets: offsets(kind),
        color: kind.color(),
    }
}

fn offsets(kind: ShapeKind) -> ShapeOffsets {
    match kind {
        // [][]
        // [][]
        ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        // [][][][]
        ShapeKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
        // []
        // []
        // [][]
        ShapeKind::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
        // [][]
        // []
        // []
        ShapeKind::J => [(0, 0), (1, 0), (0, 1), (0, 2)],
        // []
        // [][]
        // []
        ShapeKind::T => [(0, 0), (0, 1), (1, 1), (0, 2)],
        // []
        // [][]
        //   []
        ShapeKind::S => [(0, 0), (0, 1), (1, 1), (1, 2)],
        //   []
        // [][]
        // []
        ShapeKind::Z => [(1, 0), (1, 1), (0, 1), (0, 2)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SHAPE_BOX;

    #[test]
    fn test_offsets_fit_in_box() {
        for kind in ShapeKind::ALL {
            for (x, y) in get_shape(kind).offsets {
                assert!((0..SHAPE_BOX).contains(&x), "{:?} x={}", kind, x);
                assert!((0..SHAPE_BOX).contains(&y), "{:?} y={}", kind, y);
            }
        }
    }

    #[test]
    fn test_offsets_are_distinct() {
        for kind in ShapeKind::ALL {
            let offsets = get_shape(kind).offsets;
            for i in 0..offsets.len() {
                for j in (i + 1)..offsets.len() {
                    assert_ne!(offsets[i], offsets[j], "{:?} has duplicate tile", kind);
                }
            }
        }
    }

    #[test]
    fn test_shape_color_matches_kind() {
        for kind in ShapeKind::ALL {
            assert_eq!(get_shape(kind).color, kind.color());
        }
    }
}
