use glam::Vec2;

use crate::constants::*;
use crate::geometry::{Direction, Rect};

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Which kind of actor an entity is. Behaviour that differs between the
/// player and enemies is decided here rather than by probing for components.
/// Every actor moves and takes damage, so only pathing is a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Enemy(EnemyKind),
}

impl ActorKind {
    /// Driven by the pathfinder each tick rather than by input.
    pub fn is_pathable(&self) -> bool {
        matches!(self, ActorKind::Enemy(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Slime,
    Skeleton,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Slime => "Slime",
            EnemyKind::Skeleton => "Skeleton",
        }
    }
}

/// World-space bounding box used for every overlap test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox(pub Rect);

impl Hitbox {
    pub fn centered(center: Vec2, side: f32) -> Self {
        Self(Rect::centered(center, Vec2::splat(side)))
    }

    pub fn center(&self) -> Vec2 {
        self.0.center()
    }
}

/// Health component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn damage(&mut self, amount: i32) {
        self.current -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Movement speed in world units per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Which visual/behavioral branch is active. Enemies mid-attack do not re-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Moving,
    Attacking,
    Dead,
}

impl AnimState {
    pub fn label(&self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Moving => "moving",
            AnimState::Attacking => "attacking",
            AnimState::Dead => "dead",
        }
    }
}

/// Direction the player last moved in; abilities are aimed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing(pub Direction);

/// Gold carried by the player, persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wallet {
    pub gold: u32,
}

/// Enemy marker with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Melee attack with a wind-up. `remaining` counts down while the attack is
/// in progress and is `None` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub damage: i32,
    pub windup_ticks: u32,
    pub remaining: Option<u32>,
}

impl Attack {
    pub fn new(damage: i32, windup_ticks: u32) -> Self {
        Self {
            damage,
            windup_ticks,
            remaining: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Semicircle in front of the player
    Sweep,
    /// Two tiles straight ahead
    Thrust,
    /// The player's tile and its four orthogonal neighbours
    Whirl,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 3] = [AbilityKind::Sweep, AbilityKind::Thrust, AbilityKind::Whirl];

    pub fn damage(&self) -> i32 {
        match self {
            AbilityKind::Sweep => SWEEP_DAMAGE,
            AbilityKind::Thrust => THRUST_DAMAGE,
            AbilityKind::Whirl => WHIRL_DAMAGE,
        }
    }

    pub fn cooldown_ticks(&self) -> u32 {
        match self {
            AbilityKind::Sweep => SWEEP_COOLDOWN_TICKS,
            AbilityKind::Thrust => THRUST_COOLDOWN_TICKS,
            AbilityKind::Whirl => WHIRL_COOLDOWN_TICKS,
        }
    }

    fn slot(&self) -> usize {
        match self {
            AbilityKind::Sweep => 0,
            AbilityKind::Thrust => 1,
            AbilityKind::Whirl => 2,
        }
    }
}

/// Ticks left before each ability can be used again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityCooldowns {
    remaining: [u32; 3],
}

impl AbilityCooldowns {
    pub fn is_ready(&self, ability: AbilityKind) -> bool {
        self.remaining[ability.slot()] == 0
    }

    pub fn trigger(&mut self, ability: AbilityKind) {
        self.remaining[ability.slot()] = ability.cooldown_ticks();
    }

    pub fn tick(&mut self) {
        for ticks in &mut self.remaining {
            *ticks = ticks.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_heal_caps_at_max() {
        let mut health = Health::new(50);
        health.damage(30);
        health.heal(100);
        assert_eq!(health.current, 50);
    }

    #[test]
    fn test_health_dead_at_zero() {
        let mut health = Health::new(10);
        health.damage(10);
        assert!(health.is_dead());
    }

    #[test]
    fn test_only_enemies_are_pathable() {
        assert!(ActorKind::Enemy(EnemyKind::Slime).is_pathable());
        assert!(!ActorKind::Player.is_pathable());
    }

    #[test]
    fn test_cooldowns_count_down() {
        let mut cooldowns = AbilityCooldowns::default();
        assert!(cooldowns.is_ready(AbilityKind::Sweep));
        cooldowns.trigger(AbilityKind::Sweep);
        assert!(!cooldowns.is_ready(AbilityKind::Sweep));
        assert!(cooldowns.is_ready(AbilityKind::Whirl));
        for _ in 0..SWEEP_COOLDOWN_TICKS {
            cooldowns.tick();
        }
        assert!(cooldowns.is_ready(AbilityKind::Sweep));
    }
}
