//! Player ability constants.

/// Sweep: semicircle in front of the player
pub const SWEEP_DAMAGE: i32 = 12;
/// Ticks before sweep can be used again
pub const SWEEP_COOLDOWN_TICKS: u32 = 10;

/// Thrust: two tiles straight ahead
pub const THRUST_DAMAGE: i32 = 18;
/// Ticks before thrust can be used again
pub const THRUST_COOLDOWN_TICKS: u32 = 14;

/// Whirl: the player's tile and its four orthogonal neighbours
pub const WHIRL_DAMAGE: i32 = 8;
/// Ticks before whirl can be used again
pub const WHIRL_COOLDOWN_TICKS: u32 = 30;
