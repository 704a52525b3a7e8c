//! Board module - manages the game grid
//!
//! The board is a 10x30 grid where each cell is empty or holds a handle to a
//! landed tile. Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..29 (top to bottom)
//!
//! Every occupied cell holds a parentless tile whose local coordinates equal
//! the cell position. Row clearing keeps that true.

use arrayvec::ArrayVec;

use crate::tile::{TileArena, TileId};
use crate::types::{Coordinates, TileColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A board cell (None = empty)
pub type Cell = Option<TileId>;

/// Original indices of removed rows, bottom-most first
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 30 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn tile_at(&self, pos: Coordinates) -> Cell {
        self.get(pos.x, pos.y).flatten()
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        !Coordinates::new(x, y).in_bounds()
    }

    /// Out of bounds or occupied.
    pub fn collides(&self, pos: Coordinates) -> bool {
        !matches!(self.get(pos.x, pos.y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Number of occupied cells in a row.
    pub fn row_count(&self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().filter(|c| c.is_some()).count()
    }

    /// Number of occupied cells on the whole board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Place a parentless tile at its own local coordinates.
    ///
    /// A different tile already in that cell is despawned. Returns false if
    /// the tile is dead, still parented, or out of bounds.
    pub fn insert(&mut self, arena: &mut TileArena, id: TileId) -> bool {
        let Some(tile) = arena.get(id) else {
            return false;
        };
        if tile.parent().is_some() {
            return false;
        }
        let pos = tile.local;
        if self.is_out_of_bounds(pos.x, pos.y) {
            return false;
        }
        if let Some(old) = self.tile_at(pos).filter(|&old| old != id) {
            arena.despawn(old);
        }
        self.set(pos.x, pos.y, Some(id))
    }

    /// Allocate a standalone tile directly on the board.
    pub fn place(
        &mut self,
        arena: &mut TileArena,
        pos: Coordinates,
        color: Option<TileColor>,
    ) -> Option<TileId> {
        if self.is_out_of_bounds(pos.x, pos.y) {
            return None;
        }
        if let Some(old) = self.tile_at(pos) {
            arena.despawn(old);
        }
        let id = arena.spawn(pos, color);
        self.set(pos.x, pos.y, Some(id));
        Some(id)
    }

    /// Remove every full row, compacting the rows above downwards.
    ///
    /// Single bottom-up pass with a cascade counter: row `y` takes the
    /// contents of row `y - full_rows`; if the rewritten row is full, the
    /// counter grows and the same `y` is processed again. Tiles of removed
    /// rows are despawned and every surviving tile's local coordinates are
    /// rewritten to its new cell.
    pub fn check_full_rows(&mut self, arena: &mut TileArena) -> ClearedRows {
        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;
        let mut cleared = ClearedRows::new();
        let mut full_rows = 0usize;

        let mut y = height;
        while y > 0 {
            let row = y - 1;
            let dst = row * width;
            if row >= full_rows {
                let src = (row - full_rows) * width;
                if src != dst {
                    self.cells.copy_within(src..src + width, dst);
                }
            } else {
                self.cells[dst..dst + width].fill(None);
            }

            if self.is_row_full(row) {
                // The rewritten row is the original row `row - full_rows`.
                cleared.push(row - full_rows);
                for cell in &self.cells[dst..dst + width] {
                    if let Some(id) = *cell {
                        arena.despawn(id);
                    }
                }
                full_rows += 1;
                continue;
            }
            y -= 1;
        }

        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(id) = *cell {
                let pos = Coordinates::new((idx % width) as i32, (idx / width) as i32);
                arena.set_local(id, pos);
            }
        }

        cleared
    }

    /// Iterate every cell as `(x, y, cell)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| ((idx % width) as i32, (idx / width) as i32, cell))
    }

}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTTOM: i32 = BOARD_HEIGHT as i32 - 1;

    fn fill_row(board: &mut Board, arena: &mut TileArena, y: i32) {
        for x in 0..BOARD_WIDTH as i32 {
            board.place(arena, Coordinates::new(x, y), Some(TileColor::Blue));
        }
    }

    fn assert_locals_mirror_cells(board: &Board, arena: &TileArena) {
        for (x, y, cell) in board.iter() {
            if let Some(id) = cell {
                let tile = arena.get(id).expect("board tile must be alive");
                assert!(tile.parent().is_none());
                assert_eq!(tile.local, Coordinates::new(x, y));
            }
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 29), Some(299));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 30), None);
    }

    #[test]
    fn test_collides() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        assert!(!board.collides(Coordinates::new(5, 5)));
        board.place(&mut arena, Coordinates::new(5, 5), None);
        assert!(board.collides(Coordinates::new(5, 5)));
        assert!(board.collides(Coordinates::new(-1, 5)));
        assert!(board.collides(Coordinates::new(10, 5)));
        assert!(board.collides(Coordinates::new(5, -1)));
        assert!(board.collides(Coordinates::new(5, 30)));
    }

    #[test]
    fn test_insert_requires_parentless_tile() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        let root = arena.spawn(Coordinates::new(0, 0), None);
        let child = arena.spawn(Coordinates::new(2, 3), None);
        arena.add_child(root, child);

        assert!(!board.insert(&mut arena, child));
        arena.remove_child(root, child);
        assert!(board.insert(&mut arena, child));
        assert_eq!(board.tile_at(Coordinates::new(2, 3)), Some(child));

        // Re-inserting the same tile keeps it alive.
        assert!(board.insert(&mut arena, child));
        assert!(arena.contains(child));
    }

    #[test]
    fn test_place_replaces_old_tile() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        let first = board.place(&mut arena, Coordinates::new(1, 1), None).unwrap();
        let second = board.place(&mut arena, Coordinates::new(1, 1), None).unwrap();
        assert_eq!(board.tile_at(Coordinates::new(1, 1)), Some(second));
        assert_eq!(arena.len(), 1);
        assert_eq!(first.index(), second.index());
        assert!(!arena.contains(first));
        assert!(board.place(&mut arena, Coordinates::new(10, 0), None).is_none());
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        fill_row(&mut board, &mut arena, BOTTOM);
        let above = board
            .place(&mut arena, Coordinates::new(4, BOTTOM - 1), None)
            .unwrap();

        let cleared = board.check_full_rows(&mut arena);

        assert_eq!(cleared.as_slice(), &[BOTTOM as usize]);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.tile_at(Coordinates::new(4, BOTTOM)), Some(above));
        assert_eq!(arena.len(), 1);
        assert_locals_mirror_cells(&board, &arena);
    }

    #[test]
    fn test_clear_cascading_adjacent_rows() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        fill_row(&mut board, &mut arena, BOTTOM);
        fill_row(&mut board, &mut arena, BOTTOM - 1);
        fill_row(&mut board, &mut arena, BOTTOM - 2);
        let marker = board
            .place(&mut arena, Coordinates::new(0, BOTTOM - 3), None)
            .unwrap();

        let cleared = board.check_full_rows(&mut arena);

        assert_eq!(
            cleared.as_slice(),
            &[BOTTOM as usize, BOTTOM as usize - 1, BOTTOM as usize - 2]
        );
        assert_eq!(board.tile_at(Coordinates::new(0, BOTTOM)), Some(marker));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(arena.len(), 1);
        assert_locals_mirror_cells(&board, &arena);
    }

    #[test]
    fn test_clear_non_adjacent_rows_shift_by_rows_below() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        // Rows: 29 full, 28 marker a, 27 full, 26 marker b.
        fill_row(&mut board, &mut arena, BOTTOM);
        let a = board
            .place(&mut arena, Coordinates::new(1, BOTTOM - 1), None)
            .unwrap();
        fill_row(&mut board, &mut arena, BOTTOM - 2);
        let b = board
            .place(&mut arena, Coordinates::new(2, BOTTOM - 3), None)
            .unwrap();

        let cleared = board.check_full_rows(&mut arena);

        assert_eq!(cleared.len(), 2);
        // a had one full row below it, b had two.
        assert_eq!(board.tile_at(Coordinates::new(1, BOTTOM)), Some(a));
        assert_eq!(board.tile_at(Coordinates::new(2, BOTTOM - 1)), Some(b));
        assert_eq!(board.occupied_count(), 2);
        for y in 0..(BOARD_HEIGHT as usize - 2) {
            assert_eq!(board.row_count(y), 0);
        }
        assert_locals_mirror_cells(&board, &arena);
    }

    #[test]
    fn test_clear_top_row() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        fill_row(&mut board, &mut arena, 0);

        let cleared = board.check_full_rows(&mut arena);

        assert_eq!(cleared.as_slice(), &[0]);
        assert_eq!(board.occupied_count(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_no_full_rows_is_identity() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        for x in 0..9 {
            board.place(&mut arena, Coordinates::new(x, BOTTOM), None);
        }
        let before = board.clone();

        let cleared = board.check_full_rows(&mut arena);

        assert!(cleared.is_empty());
        assert_eq!(board, before);
        assert_locals_mirror_cells(&board, &arena);
    }

    #[test]
    fn test_clear_whole_board() {
        let mut arena = TileArena::new();
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i32 {
            fill_row(&mut board, &mut arena, y);
        }

        let cleared = board.check_full_rows(&mut arena);

        assert_eq!(cleared.len(), BOARD_HEIGHT as usize);
        assert_eq!(board.occupied_count(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_iter_visits_every_cell() {
        let board = Board::new();
        assert_eq!(board.iter().count(), BOARD_SIZE);
        let (x, y, _) = board.iter().last().unwrap();
        assert_eq!((x, y), (9, 29));
    }
}
