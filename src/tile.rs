use glam::Vec2;

use crate::geometry::Rect;

/// Specialized behavior carried by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Plain,
    /// Barrel or other impassable clutter
    Obstacle,
    /// Walkable; damages the player the first time it is stepped on
    Trap { activated: bool },
    /// Walkable; the way out once the room is cleared
    Door { opened: bool },
}

impl TileKind {
    pub fn is_blocking(&self) -> bool {
        matches!(self, TileKind::Obstacle)
    }

    /// Visual state label handed to the rendering collaborator.
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Plain => "floor",
            TileKind::Obstacle => "barrel",
            TileKind::Trap { activated: false } => "trap_armed",
            TileKind::Trap { activated: true } => "trap_sprung",
            TileKind::Door { opened: false } => "door_shut",
            TileKind::Door { opened: true } => "door_open",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootKind {
    Gold,
}

/// A value-bearing item lying on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loot {
    pub kind: LootKind,
    pub value: u32,
    pub position: Vec2,
}

impl Loot {
    pub fn gold(value: u32, position: Vec2) -> Self {
        Self {
            kind: LootKind::Gold,
            value,
            position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub column: i32,
    pub row: i32,
    pub rect: Rect,
    pub kind: TileKind,
    pub loot: Vec<Loot>,
}

impl Tile {
    pub fn new(column: i32, row: i32, tile_size: f32, kind: TileKind) -> Self {
        Self {
            column,
            row,
            rect: Rect::new(
                column as f32 * tile_size,
                row as f32 * tile_size,
                tile_size,
                tile_size,
            ),
            kind,
            loot: Vec::new(),
        }
    }

    pub fn coords(&self) -> (i32, i32) {
        (self.column, self.row)
    }

    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, TileKind::Door { .. })
    }
}
