//! Core gameplay constants (player stats, difficulty, ticks).

/// Player's starting and maximum health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Player movement speed in world units per tick
pub const PLAYER_SPEED: f32 = 10.0;
/// Player hitbox side length
pub const PLAYER_HITBOX: f32 = 50.0;

/// Difficulty of the first room
pub const DIFFICULTY_START: f32 = 1.0;
/// Difficulty added each time a room is cleared and left
pub const DIFFICULTY_STEP: f32 = 0.5;
/// Health restored per point of difficulty when leaving a room
pub const HEAL_PER_DIFFICULTY: f32 = 20.0;

/// Damage dealt by a trap the first time it is stepped on
pub const TRAP_DAMAGE: i32 = 15;

/// Simulation ticks per second in the headless runner
pub const TICK_RATE: u32 = 20;
