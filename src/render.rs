//! Plain-text frames for the headless runner.

use std::fmt::Write;

use hecs::World;

use crate::components::{AnimState, Enemy, EnemyKind, Health, Hitbox, Player};
use crate::game::Game;
use crate::grid::Grid;
use crate::occupancy;
use crate::tile::{Tile, TileKind};

fn tile_glyph(tile: &Tile) -> char {
    if !tile.loot.is_empty() {
        return '$';
    }
    match tile.kind {
        TileKind::Plain => '.',
        TileKind::Obstacle => '#',
        TileKind::Trap { activated: false } => '^',
        TileKind::Trap { activated: true } => 'x',
        TileKind::Door { opened: false } => '+',
        TileKind::Door { opened: true } => '/',
    }
}

fn enemy_glyph(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::Slime => 's',
        EnemyKind::Skeleton => 'k',
    }
}

/// Map rows, one string per grid row, with living actors drawn on top.
pub fn map_rows(world: &World, grid: &Grid) -> Vec<String> {
    let mut cells: Vec<Vec<char>> = (0..grid.height as i32)
        .map(|row| {
            (0..grid.width as i32)
                .map(|column| grid.get(column, row).map(tile_glyph).unwrap_or(' '))
                .collect()
        })
        .collect();

    let mut place = |(column, row): (i32, i32), glyph: char| {
        if let Some(cell) = cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(column as usize))
        {
            *cell = glyph;
        }
    };

    for (id, (enemy, health)) in world.query::<(&Enemy, &Health)>().iter() {
        if health.is_dead() {
            continue;
        }
        if let Some(tile) = occupancy::entity_tile(world, grid, id) {
            place(tile, enemy_glyph(enemy.kind));
        }
    }
    for (id, _) in world.query::<(&Player, &Hitbox)>().iter() {
        if let Some(tile) = occupancy::entity_tile(world, grid, id) {
            place(tile, '@');
        }
    }

    cells.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// The whole frame: status line, map, and door state.
pub fn ascii_frame(game: &Game) -> String {
    let grid = &game.room.grid;
    let health = game.player_health();
    let anim = game
        .world
        .get::<&AnimState>(game.player)
        .map(|a| *a)
        .unwrap_or(AnimState::Idle);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "tick {}  difficulty {:.1}  hp {}/{}  gold {}  enemies {}  [{}]",
        game.ticks(),
        game.difficulty(),
        health.current,
        health.max,
        game.gold(),
        game.room.living_enemies(&game.world),
        anim.label()
    );
    for row in map_rows(&game.world, grid) {
        let _ = writeln!(out, "{row}");
    }
    if let Some(door) = grid.door().and_then(|(c, r)| grid.get(c, r)) {
        let _ = writeln!(out, "{} at ({}, {})", door.kind.label(), door.column, door.row);
    }
    out
}
