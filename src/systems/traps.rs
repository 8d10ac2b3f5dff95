//! One-shot floor traps.

use hecs::{Entity, World};

use crate::components::Health;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::occupancy;
use crate::tile::TileKind;

/// Spring the trap under `player`, if there is an armed one.
///
/// A trap fires once and stays sprung for the rest of the room.
pub fn trigger_traps(
    world: &mut World,
    grid: &mut Grid,
    player: Entity,
    damage: i32,
    events: &mut EventQueue,
) -> Option<(i32, i32)> {
    let (column, row) = occupancy::entity_tile(world, grid, player)?;
    let tile = grid.get_mut(column, row)?;
    if tile.kind != (TileKind::Trap { activated: false }) {
        return None;
    }
    tile.kind = TileKind::Trap { activated: true };

    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.damage(damage);
    }
    log::debug!("trap sprung at ({column}, {row}) for {damage}");
    events.push(GameEvent::TrapTriggered {
        tile: (column, row),
        damage,
    });
    Some((column, row))
}
