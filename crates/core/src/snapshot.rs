use crate::types::{Coordinates, ShapeKind, TileColor, BOARD_HEIGHT, BOARD_WIDTH, TETROMINO_TILES};

/// Board grid code for an empty cell.
pub const CELL_EMPTY: u8 = 0;

/// Board grid code for a tile without a display color.
pub const CELL_PLAIN: u8 = 8;

/// Encode a tile color into a board grid code (1-7, or [`CELL_PLAIN`]).
pub fn color_code(color: Option<TileColor>) -> u8 {
    match color {
        Some(TileColor::Cyan) => 1,
        Some(TileColor::Yellow) => 2,
        Some(TileColor::Purple) => 3,
        Some(TileColor::Green) => 4,
        Some(TileColor::Red) => 5,
        Some(TileColor::Blue) => 6,
        Some(TileColor::Orange) => 7,
        None => CELL_PLAIN,
    }
}

/// Decode a board grid code. Empty and plain cells have no color.
pub fn color_from_code(code: u8) -> Option<TileColor> {
    match code {
        1 => Some(TileColor::Cyan),
        2 => Some(TileColor::Yellow),
        3 => Some(TileColor::Purple),
        4 => Some(TileColor::Green),
        5 => Some(TileColor::Red),
        6 => Some(TileColor::Blue),
        7 => Some(TileColor::Orange),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: TileColor,
    pub anchor: Coordinates,
    /// World positions of the four tiles
    pub cells: [Coordinates; TETROMINO_TILES],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[CELL_EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.game_over = false;
        self.piece_id = 0;
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .is_some_and(|&code| code != CELL_EMPTY)
    }

    pub fn occupied_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&code| code != CELL_EMPTY)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[CELL_EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            game_over: false,
            piece_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_codes_roundtrip() {
        for color in [
            TileColor::Cyan,
            TileColor::Yellow,
            TileColor::Purple,
            TileColor::Green,
            TileColor::Red,
            TileColor::Blue,
            TileColor::Orange,
        ] {
            let code = color_code(Some(color));
            assert!((1..=7).contains(&code));
            assert_eq!(color_from_code(code), Some(color));
        }
        assert_eq!(color_code(None), CELL_PLAIN);
        assert_eq!(color_from_code(CELL_PLAIN), None);
        assert_eq!(color_from_code(CELL_EMPTY), None);
    }

    #[test]
    fn default_snapshot_is_empty() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.occupied_count(), 0);
        assert!(!snap.game_over);
        assert!(!snap.is_occupied(0, 0));
        assert!(!snap.is_occupied(100, 0));
    }
}
