//! Perlin terrain oracle parameters.

/// Divisor applied to cell coordinates before sampling noise
pub const TERRAIN_SCALE: f64 = 5.0;
/// Number of fBm octaves
pub const TERRAIN_OCTAVES: usize = 4;
/// Amplitude falloff per octave
pub const TERRAIN_PERSISTENCE: f64 = 0.5;
/// Frequency gain per octave
pub const TERRAIN_LACUNARITY: f64 = 3.0;
/// Noise values below this become obstacles
pub const TERRAIN_OBSTACLE_THRESHOLD: f64 = -0.2;
/// Noise values above this become enemy spawn candidates
pub const TERRAIN_ENEMY_THRESHOLD: f64 = 0.25;
