//! Occupancy and hit-testing queries.
//!
//! Actors never remember which tile they are on; it is derived from their
//! hitbox whenever it is needed. These are read-only queries over the grid
//! and the world.

use std::collections::HashSet;

use hecs::{Entity, World};

use crate::components::{AbilityKind, ActorKind, Enemy, Health, Hitbox};
use crate::geometry::{Direction, Rect};
use crate::grid::Grid;

/// The tile an actor stands on.
///
/// The player is on whichever tile contains its hitbox centre. An enemy is
/// on the first non-blocking tile, in column-major order, that its hitbox
/// overlaps. `None` when nothing qualifies, e.g. right after spawning on an
/// edge.
pub fn occupied_tile(grid: &Grid, hitbox: &Rect, kind: ActorKind) -> Option<(i32, i32)> {
    match kind {
        ActorKind::Player => grid.tile_containing(hitbox.center()).map(|t| t.coords()),
        ActorKind::Enemy(_) => grid
            .tiles_by_column()
            .find(|t| !t.is_blocking() && t.rect.intersects(hitbox))
            .map(|t| t.coords()),
    }
}

/// Convenience lookup of an entity's tile from its components.
pub fn entity_tile(world: &World, grid: &Grid, entity: Entity) -> Option<(i32, i32)> {
    let hitbox = world.get::<&Hitbox>(entity).ok()?.0;
    let kind = *world.get::<&ActorKind>(entity).ok()?;
    occupied_tile(grid, &hitbox, kind)
}

/// True iff the tile exists and does not block movement.
pub fn tile_is_free(grid: &Grid, column: i32, row: i32) -> bool {
    grid.get(column, row).is_some_and(|t| !t.is_blocking())
}

/// Every living enemy whose hitbox overlaps the tile.
pub fn actors_on_tile(world: &World, grid: &Grid, column: i32, row: i32) -> Vec<Entity> {
    let Some(tile_rect) = grid.get(column, row).map(|t| t.rect) else {
        return Vec::new();
    };
    world
        .query::<(&Hitbox, &Health, &Enemy)>()
        .iter()
        .filter(|(_, (hitbox, health, _))| !health.is_dead() && hitbox.0.intersects(&tile_rect))
        .map(|(id, _)| id)
        .collect()
}

/// Tiles occupied by living enemies other than `except`, for the pathfinder.
pub fn blocked_by_enemies(world: &World, grid: &Grid, except: Entity) -> HashSet<(i32, i32)> {
    world
        .query::<(&Hitbox, &Health, &ActorKind, &Enemy)>()
        .iter()
        .filter(|(id, (_, health, _, _))| *id != except && !health.is_dead())
        .filter_map(|(_, (hitbox, _, kind, _))| occupied_tile(grid, &hitbox.0, *kind))
        .collect()
}

/// Tiles an ability covers when used from `origin` while facing `facing`.
///
/// Built from single-step lookups, so tiles past the grid edge are simply
/// missing from the result.
pub fn ability_tiles(
    grid: &Grid,
    origin: (i32, i32),
    ability: AbilityKind,
    facing: Direction,
) -> Vec<(i32, i32)> {
    let Some(current) = grid.get(origin.0, origin.1) else {
        return Vec::new();
    };
    let mut tiles = vec![current.coords()];
    let ahead = grid.step(origin.0, origin.1, facing);

    match ability {
        AbilityKind::Sweep => {
            tiles.extend(ahead.map(|t| t.coords()));
            for side in facing.perpendicular() {
                tiles.extend(grid.step(origin.0, origin.1, side).map(|t| t.coords()));
            }
            if let Some(ahead) = ahead {
                for side in facing.perpendicular() {
                    tiles.extend(grid.step(ahead.column, ahead.row, side).map(|t| t.coords()));
                }
            }
        }
        AbilityKind::Thrust => {
            if let Some(ahead) = ahead {
                tiles.push(ahead.coords());
                tiles.extend(grid.step(ahead.column, ahead.row, facing).map(|t| t.coords()));
            }
        }
        AbilityKind::Whirl => {
            for direction in Direction::ALL {
                tiles.extend(grid.step(origin.0, origin.1, direction).map(|t| t.coords()));
            }
        }
    }
    tiles
}

/// Living enemies touched by an ability, each listed once.
pub fn actors_hit(
    world: &World,
    grid: &Grid,
    origin: (i32, i32),
    ability: AbilityKind,
    facing: Direction,
) -> Vec<Entity> {
    let mut seen = HashSet::new();
    ability_tiles(grid, origin, ability, facing)
        .into_iter()
        .flat_map(|(c, r)| actors_on_tile(world, grid, c, r))
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EnemyKind;
    use crate::tile::TileKind;
    use glam::Vec2;

    const SLIME: ActorKind = ActorKind::Enemy(EnemyKind::Slime);

    fn spawn_enemy(world: &mut World, center: Vec2, health: i32) -> Entity {
        let mut hp = Health::new(10);
        hp.current = health;
        world.spawn((
            Hitbox::centered(center, 40.0),
            hp,
            SLIME,
            Enemy { kind: EnemyKind::Slime },
        ))
    }

    #[test]
    fn test_centered_hitbox_occupies_its_tile() {
        let grid = Grid::new(5, 5, 70.0);
        let center = grid.get(2, 3).unwrap().center();
        let hitbox = Rect::centered(center, Vec2::splat(50.0));
        assert_eq!(occupied_tile(&grid, &hitbox, ActorKind::Player), Some((2, 3)));
        assert_eq!(occupied_tile(&grid, &hitbox, SLIME), Some((2, 3)));
    }

    #[test]
    fn test_enemy_never_occupies_obstacle() {
        let mut grid = Grid::new(5, 5, 70.0);
        grid.get_mut(1, 1).unwrap().kind = TileKind::Obstacle;
        // Straddles (1, 1) and (2, 1)
        let hitbox = Rect::new(120.0, 80.0, 40.0, 40.0);
        assert_eq!(occupied_tile(&grid, &hitbox, SLIME), Some((2, 1)));
    }

    #[test]
    fn test_enemy_scan_is_column_major() {
        let grid = Grid::new(5, 5, 70.0);
        // Overlaps (1, 1), (2, 1), (1, 2) and (2, 2)
        let hitbox = Rect::centered(Vec2::new(140.0, 140.0), Vec2::splat(40.0));
        assert_eq!(occupied_tile(&grid, &hitbox, SLIME), Some((1, 1)));
    }

    #[test]
    fn test_off_grid_hitbox_occupies_nothing() {
        let grid = Grid::new(3, 3, 70.0);
        let hitbox = Rect::new(-100.0, -100.0, 40.0, 40.0);
        assert_eq!(occupied_tile(&grid, &hitbox, ActorKind::Player), None);
        assert_eq!(occupied_tile(&grid, &hitbox, SLIME), None);
    }

    #[test]
    fn test_tile_is_free() {
        let mut grid = Grid::new(3, 3, 70.0);
        grid.get_mut(0, 0).unwrap().kind = TileKind::Obstacle;
        grid.get_mut(1, 0).unwrap().kind = TileKind::Trap { activated: false };
        assert!(!tile_is_free(&grid, 0, 0));
        assert!(tile_is_free(&grid, 1, 0));
        assert!(!tile_is_free(&grid, 3, 0));
    }

    #[test]
    fn test_actors_on_tile_skips_dead() {
        let grid = Grid::new(4, 4, 70.0);
        let mut world = World::new();
        let center = grid.get(1, 1).unwrap().center();
        let alive = spawn_enemy(&mut world, center, 10);
        let _dead = spawn_enemy(&mut world, center, 0);

        assert_eq!(actors_on_tile(&world, &grid, 1, 1), vec![alive]);
        assert!(actors_on_tile(&world, &grid, 3, 3).is_empty());
    }

    #[test]
    fn test_blocked_by_enemies_excludes_self() {
        let grid = Grid::new(4, 4, 70.0);
        let mut world = World::new();
        let me = spawn_enemy(&mut world, grid.get(0, 0).unwrap().center(), 10);
        let _other = spawn_enemy(&mut world, grid.get(2, 2).unwrap().center(), 10);
        let _corpse = spawn_enemy(&mut world, grid.get(3, 3).unwrap().center(), -4);

        let blocked = blocked_by_enemies(&world, &grid, me);
        assert_eq!(blocked, [(2, 2)].into_iter().collect());
    }

    #[test]
    fn test_left_sweep_pattern() {
        let grid = Grid::new(5, 5, 70.0);
        let tiles = ability_tiles(&grid, (2, 2), AbilityKind::Sweep, Direction::Left);
        assert_eq!(tiles, vec![(2, 2), (1, 2), (2, 1), (2, 3), (1, 1), (1, 3)]);
    }

    #[test]
    fn test_sweep_clipped_at_edge() {
        let grid = Grid::new(5, 5, 70.0);
        let tiles = ability_tiles(&grid, (0, 0), AbilityKind::Sweep, Direction::Left);
        assert_eq!(tiles, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_thrust_and_whirl_patterns() {
        let grid = Grid::new(5, 5, 70.0);
        assert_eq!(
            ability_tiles(&grid, (1, 1), AbilityKind::Thrust, Direction::Down),
            vec![(1, 1), (1, 2), (1, 3)]
        );
        assert_eq!(
            ability_tiles(&grid, (1, 1), AbilityKind::Whirl, Direction::Up),
            vec![(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]
        );
    }

    #[test]
    fn test_actors_hit_lists_each_enemy_once() {
        let grid = Grid::new(5, 5, 70.0);
        let mut world = World::new();
        // Straddles (1, 2) and (1, 1), both inside a left sweep from (2, 2)
        let enemy = spawn_enemy(&mut world, Vec2::new(105.0, 140.0), 10);
        let _far = spawn_enemy(&mut world, grid.get(4, 4).unwrap().center(), 10);

        let hit = actors_hit(&world, &grid, (2, 2), AbilityKind::Sweep, Direction::Left);
        assert_eq!(hit, vec![enemy]);
    }
}
