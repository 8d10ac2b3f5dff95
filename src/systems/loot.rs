//! Picking up loot from the floor.

use hecs::{Entity, World};

use crate::components::Wallet;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::occupancy;
use crate::tile::LootKind;

/// Move all loot on the player's tile into its wallet. Returns the gold gained.
pub fn collect_loot(world: &mut World, grid: &mut Grid, player: Entity, events: &mut EventQueue) -> u32 {
    let Some((column, row)) = occupancy::entity_tile(world, grid, player) else {
        return 0;
    };
    let items = grid.take_loot(column, row);
    if items.is_empty() {
        return 0;
    }

    let gold: u32 = items
        .iter()
        .filter(|l| l.kind == LootKind::Gold)
        .map(|l| l.value)
        .sum();

    if let Ok(mut wallet) = world.get::<&mut Wallet>(player) {
        wallet.gold = wallet.gold.saturating_add(gold);
    }
    for item in &items {
        events.push(GameEvent::LootCollected {
            tile: (column, row),
            value: item.value,
        });
    }
    gold
}
