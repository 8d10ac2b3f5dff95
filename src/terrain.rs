//! Terrain oracle: decides where obstacles and enemy spawns go.
//!
//! The room only sees the resulting coordinate sets; how they are chosen is
//! the oracle's business.

use std::collections::BTreeSet;

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::Rng;

use crate::config::TerrainConfig;

/// Cell coordinates proposed for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainLayout {
    pub obstacles: BTreeSet<(i32, i32)>,
    pub enemy_spawns: BTreeSet<(i32, i32)>,
}

pub trait TerrainOracle {
    /// Produce a fresh layout for a `width` x `height` grid.
    fn generate(&mut self, width: usize, height: usize, rng: &mut dyn rand::RngCore) -> TerrainLayout;
}

/// Fractal Perlin terrain, reseeded on every call.
#[derive(Debug, Clone)]
pub struct NoiseTerrain {
    config: TerrainConfig,
}

impl NoiseTerrain {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    fn sample_field(&self, seed: u32, width: usize, height: usize) -> Vec<f64> {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(self.config.octaves)
            .set_persistence(self.config.persistence)
            .set_lacunarity(self.config.lacunarity);

        let mut field = Vec::with_capacity(width * height);
        for column in 0..width {
            for row in 0..height {
                field.push(fbm.get([
                    column as f64 / self.config.scale,
                    row as f64 / self.config.scale,
                ]));
            }
        }
        field
    }
}

impl TerrainOracle for NoiseTerrain {
    fn generate(&mut self, width: usize, height: usize, rng: &mut dyn rand::RngCore) -> TerrainLayout {
        let seed: u32 = rng.gen_range(0..=255);
        let field = self.sample_field(seed, width, height);

        let mut layout = TerrainLayout::default();
        for (i, value) in field.into_iter().enumerate() {
            let cell = ((i / height) as i32, (i % height) as i32);
            if value < self.config.obstacle_threshold {
                layout.obstacles.insert(cell);
            } else if value > self.config.enemy_threshold {
                layout.enemy_spawns.insert(cell);
            }
        }
        log::debug!(
            "terrain seed {seed}: {} obstacles, {} spawn candidates",
            layout.obstacles.len(),
            layout.enemy_spawns.len()
        );
        layout
    }
}

/// Hand-authored layout, returned unchanged on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedTerrain {
    pub layout: TerrainLayout,
}

impl FixedTerrain {
    pub fn new(obstacles: &[(i32, i32)], enemy_spawns: &[(i32, i32)]) -> Self {
        Self {
            layout: TerrainLayout {
                obstacles: obstacles.iter().copied().collect(),
                enemy_spawns: enemy_spawns.iter().copied().collect(),
            },
        }
    }
}

impl TerrainOracle for FixedTerrain {
    fn generate(&mut self, _width: usize, _height: usize, _rng: &mut dyn rand::RngCore) -> TerrainLayout {
        self.layout.clone()
    }
}
