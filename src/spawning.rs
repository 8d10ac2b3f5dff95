//! Data-driven entity spawning system.
//!
//! Defines enemy types and their properties, allowing easy addition of new enemies
//! without modifying spawning code.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{
    AbilityCooldowns, ActorKind, AnimState, Attack, Enemy, EnemyKind, Facing, Health, Hitbox,
    Player, Speed, Wallet,
};
use crate::constants::*;
use crate::geometry::Direction;

/// Definition of an enemy type - all the data needed to spawn one
#[derive(Clone)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    /// Health at difficulty 1.0
    pub health: i32,
    /// World units per tick
    pub speed: f32,
    /// Damage at difficulty 1.0
    pub damage: i32,
    pub windup_ticks: u32,
    pub hitbox: f32,
}

impl EnemyDef {
    /// Spawn this enemy type centred at `center`, with health and damage
    /// scaled by `difficulty`.
    pub fn spawn(&self, world: &mut World, center: Vec2, difficulty: f32) -> Entity {
        world.spawn((
            Enemy { kind: self.kind },
            ActorKind::Enemy(self.kind),
            Hitbox::centered(center, self.hitbox),
            Health::new(scale(self.health, difficulty)),
            Speed(self.speed),
            AnimState::Idle,
            Attack::new(scale(self.damage, difficulty), self.windup_ticks),
        ))
    }
}

fn scale(base: i32, difficulty: f32) -> i32 {
    ((base as f32 * difficulty).round() as i32).max(1)
}

/// Predefined enemy types
pub mod enemies {
    use super::*;

    pub const SLIME: EnemyDef = EnemyDef {
        kind: EnemyKind::Slime,
        health: SLIME_HEALTH,
        speed: SLIME_SPEED,
        damage: SLIME_DAMAGE,
        windup_ticks: SLIME_WINDUP_TICKS,
        hitbox: SLIME_HITBOX,
    };

    pub const SKELETON: EnemyDef = EnemyDef {
        kind: EnemyKind::Skeleton,
        health: SKELETON_HEALTH,
        speed: SKELETON_SPEED,
        damage: SKELETON_DAMAGE,
        windup_ticks: SKELETON_WINDUP_TICKS,
        hitbox: SKELETON_HITBOX,
    };

    /// Skeletons start showing up from this difficulty on
    pub const SKELETON_MIN_DIFFICULTY: f32 = 2.0;

    /// Pick the enemy type for the n-th spawn of a room.
    pub fn for_spawn(index: usize, difficulty: f32) -> &'static EnemyDef {
        if difficulty >= SKELETON_MIN_DIFFICULTY && index % 3 == 2 {
            &SKELETON
        } else {
            &SLIME
        }
    }
}

/// Spawn the long-lived player entity.
pub fn spawn_player(world: &mut World, center: Vec2, health: i32, speed: f32, gold: u32) -> Entity {
    world.spawn((
        Player,
        ActorKind::Player,
        Hitbox::centered(center, PLAYER_HITBOX),
        Health::new(health),
        Speed(speed),
        AnimState::Idle,
        Facing(Direction::Right),
        Wallet { gold },
        AbilityCooldowns::default(),
    ))
}
