//! Enemy behavior: chase the player along greedy routes and hit them once
//! in reach.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{ActorKind, AnimState, Attack, Enemy, Health, Hitbox, Speed};
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::occupancy;
use crate::pathfinding::{next_hop, Pathfinder};

/// Advance every living enemy by one tick.
pub fn update_enemies(
    world: &mut World,
    grid: &Grid,
    player: Entity,
    pathfinder: &mut Pathfinder,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    let Some(player_tile) = occupancy::entity_tile(world, grid, player) else {
        return;
    };

    let living: Vec<Entity> = world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| !health.is_dead())
        .map(|(id, _)| id)
        .collect();

    for enemy in living {
        update_enemy(world, grid, enemy, player, player_tile, pathfinder, events);
    }
}

fn update_enemy(
    world: &mut World,
    grid: &Grid,
    enemy: Entity,
    player: Entity,
    player_tile: (i32, i32),
    pathfinder: &mut Pathfinder,
    events: &mut EventQueue,
) {
    // No tile this tick (e.g. pushed off the grid edge): sit the tick out
    let Some(enemy_tile) = occupancy::entity_tile(world, grid, enemy) else {
        return;
    };
    let Ok(attack) = world.get::<&Attack>(enemy).map(|a| *a) else {
        return;
    };

    if let Some(remaining) = attack.remaining {
        if remaining > 1 {
            set_attack_remaining(world, enemy, Some(remaining - 1));
            return;
        }
        set_attack_remaining(world, enemy, None);
        set_anim(world, enemy, AnimState::Idle);
        if in_reach(enemy_tile, player_tile) {
            if let Ok(mut health) = world.get::<&mut Health>(player) {
                health.damage(attack.damage);
            }
            events.push(GameEvent::Damaged {
                target: player,
                amount: attack.damage,
            });
        }
        return;
    }

    if in_reach(enemy_tile, player_tile) {
        set_attack_remaining(world, enemy, Some(attack.windup_ticks.max(1)));
        set_anim(world, enemy, AnimState::Attacking);
        return;
    }

    let pathable = world
        .get::<&ActorKind>(enemy)
        .is_ok_and(|kind| kind.is_pathable());
    if !pathable {
        return;
    }

    let blocked = occupancy::blocked_by_enemies(world, grid, enemy);
    let route = pathfinder.find_route(grid, enemy_tile, player_tile, &blocked);
    let target = next_hop(&route).and_then(|(c, r)| grid.get(c, r)).map(|t| t.center());

    match target {
        Some(target) => {
            step_toward(world, enemy, target);
            set_anim(world, enemy, AnimState::Moving);
        }
        None => set_anim(world, enemy, AnimState::Idle),
    }
}

/// Same tile or any of the eight around it.
fn in_reach(a: (i32, i32), b: (i32, i32)) -> bool {
    (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1
}

/// Move an actor's hitbox centre toward `target` by at most its speed.
fn step_toward(world: &mut World, entity: Entity, target: Vec2) {
    let speed = world.get::<&Speed>(entity).map(|s| s.0).unwrap_or(0.0);
    if let Ok(mut hitbox) = world.get::<&mut Hitbox>(entity) {
        let delta = target - hitbox.center();
        let distance = delta.length();
        let offset = if distance <= speed {
            delta
        } else {
            delta / distance * speed
        };
        hitbox.0 = hitbox.0.translated(offset);
    }
}

fn set_attack_remaining(world: &mut World, entity: Entity, remaining: Option<u32>) {
    if let Ok(mut attack) = world.get::<&mut Attack>(entity) {
        attack.remaining = remaining;
    }
}

fn set_anim(world: &mut World, entity: Entity, state: AnimState) {
    if let Ok(mut anim) = world.get::<&mut AnimState>(entity) {
        *anim = state;
    }
}
