//! Game systems organized by domain.
//!
//! Each submodule is a plain function over the world and the current grid,
//! run once per tick by [`crate::game::Game::tick`]:
//! - `movement`: Player movement with edge and wall clamping
//! - `combat`: Abilities, damage, and death handling
//! - `traps`: One-shot floor traps
//! - `loot`: Gold pickup
//! - `ai`: Enemy chase and attack behavior

pub mod ai;
pub mod combat;
pub mod loot;
pub mod movement;
pub mod traps;

// Re-export commonly used items
pub use ai::update_enemies;
pub use combat::{apply_damage, tick_cooldowns, use_ability};
pub use loot::collect_loot;
pub use movement::{move_actor, MoveResult};
pub use traps::trigger_traps;
