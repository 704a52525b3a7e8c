//! Game module - the rules engine
//!
//! Ties together the tile arena, the board, the active tetromino and the shape
//! source. Every command is a speculative mutation followed by a collision
//! check; a colliding mutation is rolled back. A gravity step that collides
//! lands the piece, clears full rows and spawns the next piece.
//!
//! Once the game is over every command is a no-op: movement and rotation
//! report [`MoveOutcome::Blocked`], stepping reports [`StepOutcome::GameOver`].

use std::fmt;

use arrayvec::ArrayVec;

use crate::board::{Board, ClearedRows};
use crate::rng::{ShapeSource, SimpleRng};
use crate::snapshot::{color_code, ActiveSnapshot, GameSnapshot};
use crate::tetromino::Tetromino;
use crate::tile::{TileArena, TileId};
use crate::types::*;

/// Receives the one-shot game-over notification
pub trait GameOverObserver {
    fn game_over(&mut self);
}

impl<F: FnMut()> GameOverObserver for F {
    fn game_over(&mut self) {
        self()
    }
}

/// Complete game state
pub struct Game<S: ShapeSource = SimpleRng> {
    board: Board,
    arena: TileArena,
    active: Option<Tetromino>,
    source: S,
    /// Monotonic id for spawned pieces; a change means the piece was replaced.
    piece_id: u32,
    /// Rows removed by the most recent landing.
    last_cleared: ClearedRows,
    game_over: bool,
    /// Set on the game-over edge, consumed by `take_game_over_event`.
    game_over_event: bool,
    observer: Option<Box<dyn GameOverObserver>>,
}

impl Game<SimpleRng> {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<S: ShapeSource> Game<S> {
    /// Create a new game drawing shapes from `source` and spawn the first piece
    pub fn with_source(source: S) -> Self {
        let mut game = Self {
            board: Board::new(),
            arena: TileArena::new(),
            active: None,
            source,
            piece_id: 0,
            last_cleared: ClearedRows::new(),
            game_over: false,
            game_over_event: false,
            observer: None,
        };
        game.spawn_random_tetromino();
        game
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn arena(&self) -> &TileArena {
        &self.arena
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// World positions of the active piece's tiles.
    pub fn active_cells(&self) -> Option<ArrayVec<Coordinates, TETROMINO_TILES>> {
        self.active.map(|p| p.world_cells(&self.arena))
    }

    pub fn active_color(&self) -> Option<TileColor> {
        self.active.map(|p| p.color())
    }

    /// Board anchor (root world position) of the active piece.
    pub fn active_anchor(&self) -> Option<Coordinates> {
        self.active.map(|p| p.anchor(&self.arena))
    }

    /// Rows removed by the most recent landing, bottom-most first.
    pub fn last_cleared(&self) -> &[usize] {
        &self.last_cleared
    }

    /// Color of the landed tile at `(x, y)`; `None` for empty cells.
    pub fn cell_color(&self, x: i32, y: i32) -> Option<Option<TileColor>> {
        let id = self.board.get(x, y).flatten()?;
        self.arena.get(id).map(|t| t.color)
    }

    /// Put a standalone tile straight onto the board.
    pub fn place_tile(&mut self, pos: Coordinates, color: Option<TileColor>) -> Option<TileId> {
        self.board.place(&mut self.arena, pos, color)
    }

    /// Register the single game-over observer, replacing any previous one.
    pub fn set_game_over_observer(&mut self, observer: impl GameOverObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Take the game-over event. Returns true exactly once per game.
    pub fn take_game_over_event(&mut self) -> bool {
        std::mem::take(&mut self.game_over_event)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        for (x, y, cell) in self.board.iter() {
            if let Some(id) = cell {
                out.board[y as usize][x as usize] = color_code(self.arena.color(id));
            }
        }

        out.active = self.active.and_then(|piece| {
            let cells: [Coordinates; TETROMINO_TILES] =
                piece.world_cells(&self.arena).into_inner().ok()?;
            Some(ActiveSnapshot {
                kind: piece.kind(),
                color: piece.color(),
                anchor: piece.anchor(&self.arena),
                cells,
            })
        });
        out.game_over = self.game_over;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// True if any tile of the active piece is off the board or on a landed tile.
    pub fn find_collisions(&self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        active
            .world_cells(&self.arena)
            .iter()
            .any(|&pos| self.board.collides(pos))
    }

    /// Translate the active piece, rolling back on collision.
    fn try_translate(&mut self, delta: Coordinates) -> MoveOutcome {
        let Some(active) = self.active else {
            return MoveOutcome::Blocked;
        };
        active.translate(&mut self.arena, delta);
        if self.find_collisions() {
            active.translate(&mut self.arena, Coordinates::default() - delta);
            return MoveOutcome::Blocked;
        }
        MoveOutcome::Free
    }

    /// Move the active piece one column.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Blocked;
        }
        self.try_translate(Coordinates::new(direction.dx(), 0))
    }

    /// Slide the active piece column by column towards `target_x`, stopping
    /// at the first blocked move.
    pub fn set_column(&mut self, target_x: i32) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Blocked;
        }
        let Some(current) = self.active_anchor() else {
            return MoveOutcome::Blocked;
        };
        let gap = target_x as i64 - current.x as i64;
        let direction = if gap < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        for _ in 0..gap.unsigned_abs() {
            if self.move_piece(direction).is_blocked() {
                return MoveOutcome::Blocked;
            }
        }
        MoveOutcome::Free
    }

    /// Rotate the active piece, undoing the rotation on collision.
    pub fn rotate(&mut self) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Blocked;
        }
        let Some(active) = self.active else {
            return MoveOutcome::Blocked;
        };
        active.rotate(&mut self.arena);
        if self.find_collisions() {
            active.unrotate(&mut self.arena);
            return MoveOutcome::Blocked;
        }
        MoveOutcome::Free
    }

    /// Apply gravity once; lands the piece if it cannot move down.
    pub fn step(&mut self) -> StepOutcome {
        if self.game_over {
            return StepOutcome::GameOver;
        }
        let Some(active) = self.active else {
            return StepOutcome::GameOver;
        };

        if self.try_translate(Coordinates::new(0, 1)) == MoveOutcome::Free {
            return StepOutcome::Falling;
        }

        self.land(active)
    }

    /// Step until the active piece has been replaced.
    pub fn drop(&mut self) -> StepOutcome {
        let start = self.piece_id;
        loop {
            let outcome = self.step();
            if outcome.is_game_over() || self.piece_id != start {
                return outcome;
            }
        }
    }

    /// Detach the piece's tiles onto the board, clear rows, spawn the next piece.
    fn land(&mut self, piece: Tetromino) -> StepOutcome {
        self.active = None;
        for (id, _) in piece.detach(&mut self.arena) {
            // Collision checks keep the active piece on free in-bounds cells.
            let inserted = self.board.insert(&mut self.arena, id);
            debug_assert!(inserted, "landed tile {id:?} does not fit the board");
        }

        self.last_cleared = self.check_full_rows();
        let rows_cleared = self.last_cleared.len() as u8;

        match self.spawn_random_tetromino() {
            SpawnOutcome::Spawned => StepOutcome::Landed { rows_cleared },
            SpawnOutcome::GameOver => StepOutcome::GameOver,
        }
    }

    /// Remove full rows from the board.
    pub fn check_full_rows(&mut self) -> ClearedRows {
        self.board.check_full_rows(&mut self.arena)
    }

    /// Spawn a piece drawn from the shape source at the spawn anchor.
    pub fn spawn_random_tetromino(&mut self) -> SpawnOutcome {
        if self.game_over {
            return SpawnOutcome::GameOver;
        }
        let kind = self.source.next_shape();
        self.spawn(kind)
    }

    /// Spawn a specific shape, replacing the active piece.
    ///
    /// A piece that collides at the anchor ends the game and stays in place.
    pub fn spawn(&mut self, kind: ShapeKind) -> SpawnOutcome {
        if self.game_over {
            return SpawnOutcome::GameOver;
        }
        if let Some(old) = self.active.take() {
            old.despawn(&mut self.arena);
        }

        self.active = Some(Tetromino::new(&mut self.arena, kind, SPAWN_POSITION));
        self.piece_id = self.piece_id.wrapping_add(1);

        if self.find_collisions() {
            self.end_game();
            return SpawnOutcome::GameOver;
        }
        SpawnOutcome::Spawned
    }

    fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.game_over_event = true;
        if let Some(observer) = self.observer.as_mut() {
            observer.game_over();
        }
    }

    /// Apply a driver action. Returns true if the action changed the game.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => !self.move_piece(Direction::Left).is_blocked(),
            GameAction::MoveRight => !self.move_piece(Direction::Right).is_blocked(),
            GameAction::Rotate => !self.rotate().is_blocked(),
            GameAction::Step => self.step_changes(|game| game.step()),
            GameAction::Drop => self.step_changes(|game| game.drop()),
            GameAction::SetColumn(x) => {
                let before = self.active_anchor();
                self.set_column(x);
                self.active_anchor() != before
            }
        }
    }

    fn step_changes(&mut self, f: impl FnOnce(&mut Self) -> StepOutcome) -> bool {
        let was_over = self.game_over;
        match f(self) {
            StepOutcome::GameOver => !was_over,
            _ => true,
        }
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: ShapeSource + fmt::Debug> fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("active", &self.active)
            .field("source", &self.source)
            .field("piece_id", &self.piece_id)
            .field("game_over", &self.game_over)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
