//! Combat system functions.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{AbilityCooldowns, AbilityKind, AnimState, Attack, Enemy, Facing, Health, Hitbox};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::occupancy;
use crate::tile::Loot;

/// Use an ability from the player's tile in the direction it faces.
///
/// Returns false if the ability is still cooling down or the player has no
/// tile this tick.
pub fn use_ability(
    world: &mut World,
    grid: &mut Grid,
    player: Entity,
    ability: AbilityKind,
    difficulty: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> bool {
    let ready = world
        .get::<&AbilityCooldowns>(player)
        .is_ok_and(|c| c.is_ready(ability));
    if !ready {
        return false;
    }
    let Some(origin) = occupancy::entity_tile(world, grid, player) else {
        return false;
    };
    let Ok(facing) = world.get::<&Facing>(player).map(|f| f.0) else {
        return false;
    };

    let hits = occupancy::actors_hit(world, grid, origin, ability, facing);
    for &target in &hits {
        apply_damage(world, grid, target, ability.damage(), difficulty, rng, events);
    }

    if let Ok(mut cooldowns) = world.get::<&mut AbilityCooldowns>(player) {
        cooldowns.trigger(ability);
    }
    if let Ok(mut anim) = world.get::<&mut AnimState>(player) {
        *anim = AnimState::Attacking;
    }
    events.push(GameEvent::AbilityUsed {
        ability,
        hits: hits.len(),
    });
    true
}

/// Apply damage to an enemy, dropping gold where it stood if this kills it.
pub fn apply_damage(
    world: &mut World,
    grid: &mut Grid,
    target: Entity,
    amount: i32,
    difficulty: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    let died = match world.get::<&mut Health>(target) {
        Ok(mut health) if !health.is_dead() => {
            health.damage(amount);
            health.is_dead()
        }
        _ => return,
    };
    events.push(GameEvent::Damaged { target, amount });

    if died {
        kill(world, grid, target, difficulty, rng, events);
    }
}

/// Soft-delete an enemy: it stays in the world, dead, until the room is left.
fn kill(
    world: &mut World,
    grid: &mut Grid,
    target: Entity,
    difficulty: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    if let Ok(mut anim) = world.get::<&mut AnimState>(target) {
        *anim = AnimState::Dead;
    }
    if let Ok(mut attack) = world.get::<&mut Attack>(target) {
        attack.remaining = None;
    }

    let gold = gold_drop(difficulty, rng);
    let tile = world
        .get::<&Hitbox>(target)
        .ok()
        .map(|h| h.center())
        .and_then(|position| grid.attach_loot(Loot::gold(gold, position)));

    let name = world.get::<&Enemy>(target).map(|e| e.kind.name()).unwrap_or("enemy");
    log::debug!("{name} {target:?} died, dropped {gold} gold at {tile:?}");
    events.push(GameEvent::EnemyDied {
        entity: target,
        tile,
        gold,
    });
}

fn gold_drop(difficulty: f32, rng: &mut impl Rng) -> u32 {
    let base = rng.gen_range(ENEMY_GOLD_DROP_MIN..=ENEMY_GOLD_DROP_MAX);
    ((base as f32 * difficulty).round() as u32).max(1)
}

/// Count every ability cooldown down by one tick.
pub fn tick_cooldowns(world: &mut World) {
    for (_, cooldowns) in world.query_mut::<&mut AbilityCooldowns>() {
        cooldowns.tick();
    }
}
