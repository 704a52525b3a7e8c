//! Tetromino module - the falling piece as a tile tree
//!
//! A tetromino is one root tile (its local coordinates are the board anchor)
//! owning exactly four child tiles whose locals encode the shape. Rotation is
//! a pure transform on the children; collision checks belong to the caller.

use arrayvec::ArrayVec;

use crate::shapes::get_shape;
use crate::tile::{TileArena, TileId};
use crate::types::{Coordinates, ShapeKind, TileColor, TETROMINO_TILES};

/// A detached tile and the world position it had at detachment
pub type DetachedTile = (TileId, Coordinates);

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    root: TileId,
    kind: ShapeKind,
}

impl Tetromino {
    /// Build a piece of `kind` with its root at `anchor`.
    pub fn new(arena: &mut TileArena, kind: ShapeKind, anchor: Coordinates) -> Self {
        let shape = get_shape(kind);
        let tiles = shape
            .coordinates()
            .map(|local| arena.spawn(local, Some(shape.color)));
        Self::from_tiles(arena, kind, anchor, &tiles)
    }

    /// Build a piece from already allocated tiles.
    ///
    /// # Panics
    ///
    /// Panics unless exactly four tiles are given.
    pub fn from_tiles(
        arena: &mut TileArena,
        kind: ShapeKind,
        anchor: Coordinates,
        tiles: &[TileId],
    ) -> Self {
        assert_eq!(
            tiles.len(),
            TETROMINO_TILES,
            "a tetromino needs exactly {} tiles",
            TETROMINO_TILES
        );
        let root = arena.spawn(anchor, None);
        for &tile in tiles {
            arena.add_child(root, tile);
        }
        Self { root, kind }
    }

    pub fn root(&self) -> TileId {
        self.root
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> TileColor {
        self.kind.color()
    }

    /// Board anchor of the root tile.
    pub fn anchor(&self, arena: &TileArena) -> Coordinates {
        arena.world_coordinates(self.root)
    }

    /// Shift the root by `delta`.
    pub fn translate(&self, arena: &mut TileArena, delta: Coordinates) {
        let local = arena.get(self.root).map(|t| t.local).unwrap_or_default();
        arena.set_local(self.root, local + delta);
    }

    /// Child tile handles in insertion order.
    pub fn tiles<'a>(&self, arena: &'a TileArena) -> &'a [TileId] {
        arena.children(self.root)
    }

    /// Local coordinates of the children.
    pub fn local_cells(&self, arena: &TileArena) -> ArrayVec<Coordinates, TETROMINO_TILES> {
        self.tiles(arena)
            .iter()
            .filter_map(|&id| arena.get(id).map(|t| t.local))
            .collect()
    }

    /// World coordinates of the children.
    pub fn world_cells(&self, arena: &TileArena) -> ArrayVec<Coordinates, TETROMINO_TILES> {
        self.tiles(arena)
            .iter()
            .map(|&id| arena.world_coordinates(id))
            .collect()
    }

    /// Rotate 90°: every child `(x, y)` becomes `(3 - y, x)`.
    pub fn rotate(&self, arena: &mut TileArena) {
        let children: ArrayVec<TileId, TETROMINO_TILES> =
            self.tiles(arena).iter().copied().collect();
        for id in children {
            if let Some(tile) = arena.get_mut(id) {
                tile.local = tile.local.rotated();
            }
        }
    }

    /// Undo one [`rotate`](Self::rotate) by rotating three more times.
    pub fn unrotate(&self, arena: &mut TileArena) {
        for _ in 0..3 {
            self.rotate(arena);
        }
    }

    /// Detach every child, rewriting its local coordinates to its former
    /// world position. The root tile is released.
    pub fn detach(self, arena: &mut TileArena) -> ArrayVec<DetachedTile, TETROMINO_TILES> {
        let children: ArrayVec<TileId, TETROMINO_TILES> =
            self.tiles(arena).iter().copied().collect();
        let mut out = ArrayVec::new();
        for id in children {
            let world = arena.world_coordinates(id);
            arena.remove_child(self.root, id);
            arena.set_local(id, world);
            out.push((id, world));
        }
        arena.despawn(self.root);
        out
    }

    /// Release the root and all children.
    pub fn despawn(self, arena: &mut TileArena) {
        let children: ArrayVec<TileId, TETROMINO_TILES> =
            self.tiles(arena).iter().copied().collect();
        for id in children {
            arena.despawn(id);
        }
        arena.despawn(self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinates {
        Coordinates::new(x, y)
    }

    #[test]
    fn test_tetromino_new() {
        let mut arena = TileArena::new();
        let piece = Tetromino::new(&mut arena, ShapeKind::O, c(3, 0));

        assert_eq!(piece.kind(), ShapeKind::O);
        assert_eq!(piece.tiles(&arena).len(), 4);
        assert_eq!(piece.anchor(&arena), c(3, 0));
        assert_eq!(
            piece.world_cells(&arena).as_slice(),
            &[c(3, 0), c(4, 0), c(3, 1), c(4, 1)]
        );
        for &id in piece.tiles(&arena) {
            assert_eq!(arena.color(id), Some(TileColor::Yellow));
        }
        // The root itself carries no color.
        assert_eq!(arena.color(piece.root()), None);
    }

    #[test]
    #[should_panic(expected = "exactly 4 tiles")]
    fn test_from_tiles_rejects_three() {
        let mut arena = TileArena::new();
        let tiles: Vec<_> = (0..3).map(|i| arena.spawn(c(i, 0), None)).collect();
        Tetromino::from_tiles(&mut arena, ShapeKind::I, c(0, 0), &tiles);
    }

    #[test]
    fn test_rotate_i_piece() {
        let mut arena = TileArena::new();
        let piece = Tetromino::new(&mut arena, ShapeKind::I, c(0, 0));

        piece.rotate(&mut arena);
        assert_eq!(
            piece.local_cells(&arena).as_slice(),
            &[c(3, 0), c(3, 1), c(3, 2), c(3, 3)]
        );
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let mut arena = TileArena::new();
        for kind in ShapeKind::ALL {
            let piece = Tetromino::new(&mut arena, kind, c(3, 0));
            let before = piece.local_cells(&arena);
            for _ in 0..4 {
                piece.rotate(&mut arena);
            }
            assert_eq!(piece.local_cells(&arena), before, "{:?}", kind);
        }
    }

    #[test]
    fn test_unrotate_is_exact_inverse() {
        let mut arena = TileArena::new();
        for kind in ShapeKind::ALL {
            let piece = Tetromino::new(&mut arena, kind, c(3, 0));
            let before = piece.local_cells(&arena);
            piece.rotate(&mut arena);
            piece.unrotate(&mut arena);
            assert_eq!(piece.local_cells(&arena), before, "{:?}", kind);

            // Also matches the direct inverse (x, y) -> (y, 3 - x).
            piece.rotate(&mut arena);
            let rotated = piece.local_cells(&arena);
            let inverse: Vec<_> = rotated.iter().map(|p| c(p.y, 3 - p.x)).collect();
            assert_eq!(inverse.as_slice(), before.as_slice(), "{:?}", kind);
        }
    }

    #[test]
    fn test_translate_moves_world_cells() {
        let mut arena = TileArena::new();
        let piece = Tetromino::new(&mut arena, ShapeKind::T, c(3, 0));
        piece.translate(&mut arena, c(-1, 2));

        assert_eq!(piece.anchor(&arena), c(2, 2));
        assert_eq!(
            piece.world_cells(&arena).as_slice(),
            &[c(2, 2), c(2, 3), c(3, 3), c(2, 4)]
        );
    }

    #[test]
    fn test_detach_rewrites_locals() {
        let mut arena = TileArena::new();
        let piece = Tetromino::new(&mut arena, ShapeKind::S, c(5, 10));
        let root = piece.root();
        let expected = piece.world_cells(&arena);

        let detached = piece.detach(&mut arena);

        assert_eq!(detached.len(), 4);
        assert!(!arena.contains(root));
        for (i, &(id, world)) in detached.iter().enumerate() {
            assert_eq!(world, expected[i]);
            let tile = arena.get(id).unwrap();
            assert!(tile.parent().is_none());
            assert_eq!(tile.local, world);
            assert_eq!(arena.world_coordinates(id), world);
        }
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_despawn_releases_everything() {
        let mut arena = TileArena::new();
        let piece = Tetromino::new(&mut arena, ShapeKind::Z, c(0, 0));
        assert_eq!(arena.len(), 5);
        piece.despawn(&mut arena);
        assert!(arena.is_empty());
    }
}
