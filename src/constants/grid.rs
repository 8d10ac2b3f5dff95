//! Room grid dimensions and tile generation constants.

/// Number of tile columns in a room
pub const GRID_COLUMNS: usize = 24;
/// Number of tile rows in a room
pub const GRID_ROWS: usize = 15;
/// Side length of a square tile in world units
pub const TILE_SIZE: f32 = 70.0;
/// Chance that an obstacle cell becomes a trap instead of a barrel
pub const TRAP_CHANCE: f64 = 0.1;
