//! Runtime configuration.
//!
//! Reads an optional JSON file. Any field left out falls back to the value in
//! `constants`, and a missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::error::StorageError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub room: RoomConfig,
    pub player: PlayerConfig,
    pub terrain: TerrainConfig,
    pub tick_rate: TickRate,
    pub wallet_path: WalletPath,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub tile_size: f32,
    pub trap_chance: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            tile_size: TILE_SIZE,
            trap_chance: TRAP_CHANCE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoomConfig {
    pub enemy_cap: usize,
    pub difficulty_start: f32,
    pub difficulty_step: f32,
    pub heal_per_difficulty: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            enemy_cap: ENEMY_CAP,
            difficulty_start: DIFFICULTY_START,
            difficulty_step: DIFFICULTY_STEP,
            heal_per_difficulty: HEAL_PER_DIFFICULTY,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: i32,
    pub speed: f32,
    pub trap_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: PLAYER_STARTING_HEALTH,
            speed: PLAYER_SPEED,
            trap_damage: TRAP_DAMAGE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
    pub obstacle_threshold: f64,
    pub enemy_threshold: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            scale: TERRAIN_SCALE,
            octaves: TERRAIN_OCTAVES,
            persistence: TERRAIN_PERSISTENCE,
            lacunarity: TERRAIN_LACUNARITY,
            obstacle_threshold: TERRAIN_OBSTACLE_THRESHOLD,
            enemy_threshold: TERRAIN_ENEMY_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TickRate(pub u32);

impl Default for TickRate {
    fn default() -> Self {
        Self(TICK_RATE)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WalletPath(pub PathBuf);

impl Default for WalletPath {
    fn default() -> Self {
        Self(PathBuf::from("gold.txt"))
    }
}

impl GameConfig {
    /// Load from `path`, or return defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_json(&text).map_err(|source| StorageError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| StorageError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject values that parse fine but cannot drive a room.
    pub fn validate(&self) -> Result<(), String> {
        let grid = &self.grid;
        if !(0.0..=1.0).contains(&grid.trap_chance) {
            return Err(format!("grid.trap_chance must be within 0 and 1, got {}", grid.trap_chance));
        }
        if grid.tile_size <= 0.0 {
            return Err(format!("grid.tile_size must be positive, got {}", grid.tile_size));
        }
        if grid.columns < 3 || grid.rows < 3 {
            return Err(format!(
                "grid must be at least 3x3, got {}x{}",
                grid.columns, grid.rows
            ));
        }
        Ok(())
    }
}
