//! Room lifecycle: generation, clearing, and moving on to the next room.

use glam::Vec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Health, Hitbox};
use crate::config::GameConfig;
use crate::constants::ENEMY_SPAWN_CLEARANCE;
use crate::error::GridError;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::occupancy;
use crate::spawning::enemies;
use crate::terrain::{TerrainLayout, TerrainOracle};
use crate::tile::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    Generating,
    Active,
    Cleared,
    Advancing,
}

/// One level: its grid, its enemies, and where it stands in the lifecycle.
#[derive(Debug)]
pub struct Room {
    pub difficulty: f32,
    pub grid: Grid,
    state: RoomState,
    enemies: Vec<Entity>,
    player_spawn: (i32, i32),
}

impl Room {
    /// Build a complete room and spawn its enemies into `world`.
    ///
    /// Nothing is published to the caller until the grid and every enemy
    /// exist, so the previous room stays valid if this fails.
    pub fn generate(
        world: &mut World,
        oracle: &mut dyn TerrainOracle,
        config: &GameConfig,
        difficulty: f32,
        rng: &mut impl Rng,
    ) -> Result<Self, GridError> {
        let mut room = Room {
            difficulty,
            grid: Grid::new(config.grid.columns, config.grid.rows, config.grid.tile_size),
            state: RoomState::Generating,
            enemies: Vec::new(),
            player_spawn: (0, 0),
        };

        let layout = oracle.generate(config.grid.columns, config.grid.rows, rng);
        room.grid.generate(&layout, config.grid.trap_chance, rng)?;
        room.player_spawn = player_spawn_tile(&room.grid).ok_or(GridError::NoSpawnCandidate)?;
        room.spawn_enemies(world, &layout, config.room.enemy_cap, rng);
        room.state = RoomState::Active;

        log::info!(
            "room generated: difficulty {:.1}, {} enemies, door at {:?}",
            difficulty,
            room.enemies.len(),
            room.grid.door()
        );
        Ok(room)
    }

    fn spawn_enemies(&mut self, world: &mut World, layout: &TerrainLayout, cap: usize, rng: &mut impl Rng) {
        let (sc, sr) = self.player_spawn;
        let mut candidates: Vec<(i32, i32)> = layout
            .enemy_spawns
            .iter()
            .copied()
            .filter(|&(c, r)| {
                occupancy::tile_is_free(&self.grid, c, r)
                    && self.grid.get(c, r).is_some_and(|t| !t.is_door())
                    && (c - sc).abs().max((r - sr).abs()) >= ENEMY_SPAWN_CLEARANCE
            })
            .collect();
        candidates.shuffle(rng);
        candidates.truncate(cap);

        for (i, (c, r)) in candidates.into_iter().enumerate() {
            let Some(center) = self.grid.get(c, r).map(|t| t.center()) else {
                continue;
            };
            let def = enemies::for_spawn(i, self.difficulty);
            self.enemies.push(def.spawn(world, center, self.difficulty));
        }
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn player_spawn(&self) -> (i32, i32) {
        self.player_spawn
    }

    /// World-space centre of the player spawn tile.
    pub fn player_spawn_center(&self) -> Vec2 {
        let (c, r) = self.player_spawn;
        self.grid
            .get(c, r)
            .map(|t| t.center())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn living_enemies(&self, world: &World) -> usize {
        self.enemies
            .iter()
            .filter(|&&e| world.get::<&Health>(e).is_ok_and(|h| !h.is_dead()))
            .count()
    }

    /// Fires the `Active -> Cleared` transition once every enemy is dead.
    ///
    /// Returns true only on the call that performs the transition; the door
    /// is opened at that moment and never again.
    pub fn check_win(&mut self, world: &World, events: &mut EventQueue) -> bool {
        if self.state != RoomState::Active || self.living_enemies(world) > 0 {
            return false;
        }
        self.state = RoomState::Cleared;
        if self.grid.open_door() {
            if let Some(tile) = self.grid.door() {
                log::info!("room cleared, door open at {tile:?}");
                events.push(GameEvent::DoorOpened { tile });
            }
        }
        true
    }

    /// True once the room is cleared and the player stands on the door.
    pub fn player_at_door(&self, world: &World, player: Entity) -> bool {
        self.state == RoomState::Cleared
            && self.grid.door().is_some()
            && occupancy::entity_tile(world, &self.grid, player) == self.grid.door()
    }
}

/// Leave `current` for a freshly generated room one difficulty step harder.
///
/// Heals the player in proportion to the outgoing difficulty, despawns the
/// old room's enemies, and moves the player onto the new spawn tile. If the
/// new room cannot be built the old one is left as it was.
pub fn advance(
    world: &mut World,
    current: &mut Room,
    player: Entity,
    oracle: &mut dyn TerrainOracle,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) -> Result<Room, GridError> {
    current.state = RoomState::Advancing;
    let next_difficulty = current.difficulty + config.room.difficulty_step;
    let next = match Room::generate(world, oracle, config, next_difficulty, rng) {
        Ok(room) => room,
        Err(e) => {
            current.state = RoomState::Cleared;
            return Err(e);
        }
    };

    let healed = (config.room.heal_per_difficulty * current.difficulty).round() as i32;
    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.heal(healed);
    }

    for entity in current.enemies.drain(..) {
        let _ = world.despawn(entity);
    }

    if let Ok(mut hitbox) = world.get::<&mut Hitbox>(player) {
        let side = hitbox.0.size.x;
        *hitbox = Hitbox::centered(next.player_spawn_center(), side);
    }

    log::info!("advanced to difficulty {next_difficulty:.1}, healed {healed}");
    events.push(GameEvent::RoomAdvanced {
        difficulty: next_difficulty,
        healed,
    });
    Ok(next)
}

/// Plain tile nearest the grid centre.
fn player_spawn_tile(grid: &Grid) -> Option<(i32, i32)> {
    let center = (grid.width as i32 / 2, grid.height as i32 / 2);
    grid.tiles()
        .filter(|t| t.kind == TileKind::Plain)
        .min_by_key(|t| (t.column - center.0).abs() + (t.row - center.1).abs())
        .map(|t| t.coords())
}
