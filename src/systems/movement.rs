//! Player movement system.

use hecs::{Entity, World};

use crate::components::{AnimState, Facing, Hitbox, Speed};
use crate::geometry::{Direction, Rect};
use crate::grid::Grid;
use crate::occupancy;

/// Result of a player move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Moved the full speed
    Moved,
    /// Stopped short against a wall or the grid edge
    Clamped,
    /// Did not move at all
    Blocked,
}

/// Move an actor one tick's worth in `direction`.
///
/// The step is clamped at the grid edge and in front of blocking tiles,
/// using the single-step lookups around the actor's current tile. A step
/// that would still overlap any blocking tile is rejected.
pub fn move_actor(world: &mut World, grid: &Grid, entity: Entity, direction: Direction) -> MoveResult {
    let Ok(hitbox) = world.get::<&Hitbox>(entity).map(|h| h.0) else {
        return MoveResult::Blocked;
    };

    if let Ok(mut facing) = world.get::<&mut Facing>(entity) {
        facing.0 = direction;
    }

    let Some(current) = occupancy::entity_tile(world, grid, entity) else {
        return MoveResult::Blocked;
    };
    let speed = world.get::<&Speed>(entity).map(|s| s.0).unwrap_or(0.0);

    let full = hitbox.translated(direction.unit() * speed);
    let ahead_open = grid
        .step(current.0, current.1, direction)
        .is_some_and(|t| !t.is_blocking());

    let proposed = if ahead_open && !overlaps_blocking(grid, &full) {
        full
    } else {
        let Some(tile_rect) = grid.get(current.0, current.1).map(|t| t.rect) else {
            return MoveResult::Blocked;
        };
        let clamped = clamp_to_edge(&hitbox, &full, &tile_rect, direction);
        if clamped == hitbox || overlaps_blocking(grid, &clamped) {
            return MoveResult::Blocked;
        }
        clamped
    };
    let result = if proposed == full {
        MoveResult::Moved
    } else {
        MoveResult::Clamped
    };

    if let Ok(mut h) = world.get::<&mut Hitbox>(entity) {
        h.0 = proposed;
    }
    if let Ok(mut anim) = world.get::<&mut AnimState>(entity) {
        *anim = AnimState::Moving;
    }
    result
}

/// Stop `proposed` at the far edge of the current tile, never pulling the
/// hitbox back past where it already is.
fn clamp_to_edge(hitbox: &Rect, proposed: &Rect, tile: &Rect, direction: Direction) -> Rect {
    let mut min = proposed.min;
    match direction {
        Direction::Left => min.x = min.x.max(tile.min.x.min(hitbox.min.x)),
        Direction::Up => min.y = min.y.max(tile.min.y.min(hitbox.min.y)),
        Direction::Right => {
            let limit = (tile.max().x - hitbox.size.x).max(hitbox.min.x);
            min.x = min.x.min(limit);
        }
        Direction::Down => {
            let limit = (tile.max().y - hitbox.size.y).max(hitbox.min.y);
            min.y = min.y.min(limit);
        }
    }
    Rect { min, size: proposed.size }
}

fn overlaps_blocking(grid: &Grid, rect: &Rect) -> bool {
    grid.tiles().any(|t| t.is_blocking() && t.rect.intersects(rect))
}
