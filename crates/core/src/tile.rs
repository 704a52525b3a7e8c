//! Tile module - tile tree stored in an arena
//!
//! Every tile lives in a [`TileArena`] and is addressed by a [`TileId`] handle.
//! A tile may hang under one parent (forming a small tree: tetromino root ->
//! four children) or stand alone as a board cell. The parent link is a plain
//! non-owning handle; the arena owns every tile's lifetime.
//!
//! World coordinates are derived, never stored: a tile's local coordinates plus
//! its parent's world coordinates, recursively.
//!
//! Slots are recycled. Each slot carries a generation that is bumped on
//! despawn, so a handle kept past its tile's lifetime stops resolving instead
//! of aliasing whatever tile reuses the slot.

use crate::types::{Coordinates, TileColor};

/// Handle to a tile slot in a [`TileArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    /// Slot index inside the arena.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Slot generation the handle was issued for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A single node of the tile tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Offset from the parent, or the board position when there is no parent
    pub local: Coordinates,
    /// Display tag, passed through untouched
    pub color: Option<TileColor>,
    parent: Option<TileId>,
    children: Vec<TileId>,
}

impl Tile {
    fn new(local: Coordinates, color: Option<TileColor>) -> Self {
        Self {
            local,
            color,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<TileId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[TileId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

/// Slot storage for tiles with slot recycling
#[derive(Debug, Clone, Default)]
pub struct TileArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl TileArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached tile.
    pub fn spawn(&mut self, local: Coordinates, color: Option<TileColor>) -> TileId {
        let tile = Tile::new(local, color);
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.tile = Some(tile);
                TileId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    tile: Some(tile),
                });
                TileId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        }
    }

    /// Destroy a tile and release its slot.
    ///
    /// The tile is unlinked from its parent first; its own children become
    /// parentless. Despawning a dead or stale handle is a no-op.
    pub fn despawn(&mut self, id: TileId) {
        let Some(slot) = self
            .slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
        else {
            return;
        };
        let Some(tile) = slot.tile.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(parent) = tile.parent {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|&c| c != id);
            }
        }
        for child in tile.children {
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
        }
        self.free.push(id.index);
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.tile.as_ref())
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.tile.as_mut())
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live tiles.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach `child` under `parent`, appending to the parent's children.
    ///
    /// No cycle check is made; callers must not attach an ancestor under its
    /// own descendant. A child that already has a parent is moved.
    pub fn add_child(&mut self, parent: TileId, child: TileId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if let Some(old) = self.get(child).and_then(Tile::parent) {
            self.remove_child(old, child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
    }

    /// Detach `child` from `parent`. A tile that is not a child of `parent`
    /// is left alone.
    pub fn remove_child(&mut self, parent: TileId, child: TileId) {
        let Some(p) = self.get_mut(parent) else {
            return;
        };
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return;
        };
        p.children.remove(pos);
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
    }

    /// Local coordinates summed up the parent chain.
    ///
    /// Dead handles resolve to the origin.
    pub fn world_coordinates(&self, id: TileId) -> Coordinates {
        let mut world = Coordinates::default();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(tile) = self.get(current) else {
                break;
            };
            world = world + tile.local;
            cursor = tile.parent;
        }
        world
    }

    pub fn set_local(&mut self, id: TileId, local: Coordinates) {
        if let Some(tile) = self.get_mut(id) {
            tile.local = local;
        }
    }

    pub fn color(&self, id: TileId) -> Option<TileColor> {
        self.get(id).and_then(|t| t.color)
    }

    pub fn children(&self, id: TileId) -> &[TileId] {
        self.get(id).map(Tile::children).unwrap_or(&[])
    }
}
