//! Game event system for decoupled communication between systems.
//!
//! Systems emit events during a tick; the caller drains them afterwards for
//! logging, rendering, or assertions.

use hecs::Entity;

use crate::components::AbilityKind;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player used an ability
    AbilityUsed { ability: AbilityKind, hits: usize },
    /// An entity took damage
    Damaged { target: Entity, amount: i32 },
    /// An enemy died and dropped gold on a tile
    EnemyDied { entity: Entity, tile: Option<(i32, i32)>, gold: u32 },
    /// The player stepped on an armed trap
    TrapTriggered { tile: (i32, i32), damage: i32 },
    /// The player picked up gold
    LootCollected { tile: (i32, i32), value: u32 },
    /// Every enemy in the room is dead and the door opened
    DoorOpened { tile: (i32, i32) },
    /// The player walked through the open door
    RoomAdvanced { difficulty: f32, healed: i32 },
    /// The player's health reached zero
    PlayerDied,
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }
}
