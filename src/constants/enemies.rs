//! Enemy stats and spawning constants.

/// Hard ceiling on enemies spawned per room
pub const ENEMY_CAP: usize = 12;
/// Minimum Chebyshev distance between the player spawn and an enemy spawn
pub const ENEMY_SPAWN_CLEARANCE: i32 = 2;

// SLIME
/// Slime base health (scaled by difficulty)
pub const SLIME_HEALTH: i32 = 30;
/// Slime movement speed in world units per tick
pub const SLIME_SPEED: f32 = 4.0;
/// Slime base attack damage (scaled by difficulty)
pub const SLIME_DAMAGE: i32 = 4;
/// Ticks between starting an attack and landing it
pub const SLIME_WINDUP_TICKS: u32 = 10;
/// Slime hitbox side length
pub const SLIME_HITBOX: f32 = 40.0;

// SKELETON
/// Skeleton base health (scaled by difficulty)
pub const SKELETON_HEALTH: i32 = 50;
/// Skeleton movement speed in world units per tick
pub const SKELETON_SPEED: f32 = 6.0;
/// Skeleton base attack damage (scaled by difficulty)
pub const SKELETON_DAMAGE: i32 = 6;
/// Ticks between starting an attack and landing it
pub const SKELETON_WINDUP_TICKS: u32 = 8;
/// Skeleton hitbox side length
pub const SKELETON_HITBOX: f32 = 50.0;

/// Gold dropped by enemies (min, before difficulty scaling)
pub const ENEMY_GOLD_DROP_MIN: u32 = 1;
/// Gold dropped by enemies (max, before difficulty scaling)
pub const ENEMY_GOLD_DROP_MAX: u32 = 10;
