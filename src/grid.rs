use glam::Vec2;
use rand::distributions::Bernoulli;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GridError;
use crate::geometry::Direction;
use crate::terrain::TerrainLayout;
use crate::tile::{Loot, Tile, TileKind};

/// Fixed-size room grid. Tiles are stored row-major and addressed by `(column, row)`.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    tiles: Vec<Tile>,
    door: Option<(i32, i32)>,
}

impl Grid {
    /// An all-plain grid with no door.
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: plain_tiles(width, height, tile_size),
            door: None,
        }
    }

    /// Rebuild every tile from a terrain layout.
    ///
    /// Obstacle cells become barrels, or traps with `trap_chance`. One plain
    /// border cell is picked as the door. The new tiles replace the old ones
    /// only once the door is placed, so a failed generation leaves the grid
    /// as it was. A `trap_chance` outside `0..=1` is rejected up front.
    pub fn generate(
        &mut self,
        layout: &TerrainLayout,
        trap_chance: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GridError> {
        let trap = Bernoulli::new(trap_chance).map_err(|_| GridError::InvalidTrapChance)?;
        let mut tiles = plain_tiles(self.width, self.height, self.tile_size);

        // Column-major so the trap rolls follow the terrain scan order
        for column in 0..self.width as i32 {
            for row in 0..self.height as i32 {
                if !layout.obstacles.contains(&(column, row)) {
                    continue;
                }
                let kind = if rng.sample(trap) {
                    TileKind::Trap { activated: false }
                } else {
                    TileKind::Obstacle
                };
                tiles[row as usize * self.width + column as usize].kind = kind;
            }
        }

        let candidates: Vec<(i32, i32)> = tiles
            .iter()
            .filter(|t| t.kind == TileKind::Plain && self.is_border(t.column, t.row))
            .map(Tile::coords)
            .collect();
        let &(column, row) = candidates.choose(rng).ok_or(GridError::NoDoorCandidate)?;
        tiles[row as usize * self.width + column as usize].kind = TileKind::Door { opened: false };

        self.tiles = tiles;
        self.door = Some((column, row));
        Ok(())
    }

    pub fn get(&self, column: i32, row: i32) -> Option<&Tile> {
        if column < 0 || row < 0 || column >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(&self.tiles[row as usize * self.width + column as usize])
    }

    pub fn get_mut(&mut self, column: i32, row: i32) -> Option<&mut Tile> {
        if column < 0 || row < 0 || column >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(&mut self.tiles[row as usize * self.width + column as usize])
    }

    /// Checked lookup for callers that hold coordinates they believe are valid.
    pub fn tile_at(&self, column: i32, row: i32) -> Result<&Tile, GridError> {
        self.get(column, row).ok_or(GridError::OutOfBounds {
            column,
            row,
            width: self.width,
            height: self.height,
        })
    }

    /// Row-major index of a tile, for per-tile scratch buffers.
    pub fn index_of(&self, column: i32, row: i32) -> Option<usize> {
        self.get(column, row)
            .map(|_| row as usize * self.width + column as usize)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tiles in column-major order.
    pub fn tiles_by_column(&self) -> impl Iterator<Item = &Tile> + '_ {
        (0..self.width as i32)
            .flat_map(move |column| (0..self.height as i32).filter_map(move |row| self.get(column, row)))
    }

    /// The 8-connected neighbourhood of a tile, clipped at the grid edges.
    ///
    /// A blocking tile reports no neighbours at all. Neighbours that are
    /// themselves blocking are still returned; filtering them is up to the
    /// caller.
    pub fn neighbors(&self, column: i32, row: i32) -> impl Iterator<Item = &Tile> + '_ {
        let expand = self.get(column, row).is_some_and(|t| !t.is_blocking());
        (-1..=1)
            .flat_map(|dc| (-1..=1).map(move |dr| (dc, dr)))
            .filter(move |&offset| expand && offset != (0, 0))
            .filter_map(move |(dc, dr)| self.get(column + dc, row + dr))
    }

    /// Single axis-aligned step, `None` past the grid edge.
    pub fn step(&self, column: i32, row: i32, direction: Direction) -> Option<&Tile> {
        let (dc, dr) = direction.offset();
        self.get(column, row)?;
        self.get(column + dc, row + dr)
    }

    pub fn tile_left(&self, column: i32, row: i32) -> Option<&Tile> {
        self.step(column, row, Direction::Left)
    }

    pub fn tile_right(&self, column: i32, row: i32) -> Option<&Tile> {
        self.step(column, row, Direction::Right)
    }

    pub fn tile_up(&self, column: i32, row: i32) -> Option<&Tile> {
        self.step(column, row, Direction::Up)
    }

    pub fn tile_down(&self, column: i32, row: i32) -> Option<&Tile> {
        self.step(column, row, Direction::Down)
    }

    /// The tile whose rectangle contains a world-space point.
    pub fn tile_containing(&self, point: Vec2) -> Option<&Tile> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.tile_size).floor() as i32;
        let row = (point.y / self.tile_size).floor() as i32;
        self.get(column, row)
    }

    pub fn door(&self) -> Option<(i32, i32)> {
        self.door
    }

    pub fn door_is_open(&self) -> bool {
        self.door
            .and_then(|(c, r)| self.get(c, r))
            .is_some_and(|t| t.kind == TileKind::Door { opened: true })
    }

    /// Open the door. Returns true only if it was shut before this call.
    pub fn open_door(&mut self) -> bool {
        let Some((column, row)) = self.door else {
            return false;
        };
        match self.get_mut(column, row) {
            Some(tile) if tile.kind == TileKind::Door { opened: false } => {
                tile.kind = TileKind::Door { opened: true };
                true
            }
            _ => false,
        }
    }

    /// Drop loot on the tile under its position. Returns that tile, or
    /// `None` if the position lies outside the grid (the loot is discarded).
    pub fn attach_loot(&mut self, loot: Loot) -> Option<(i32, i32)> {
        let coords = self.tile_containing(loot.position)?.coords();
        self.get_mut(coords.0, coords.1)?.loot.push(loot);
        Some(coords)
    }

    /// Remove and return every loot item on a tile.
    pub fn take_loot(&mut self, column: i32, row: i32) -> Vec<Loot> {
        self.get_mut(column, row)
            .map(|tile| std::mem::take(&mut tile.loot))
            .unwrap_or_default()
    }

    fn is_border(&self, column: i32, row: i32) -> bool {
        column == 0 || row == 0 || column == self.width as i32 - 1 || row == self.height as i32 - 1
    }
}

fn plain_tiles(width: usize, height: usize, tile_size: f32) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(width * height);
    for row in 0..height as i32 {
        for column in 0..width as i32 {
            tiles.push(Tile::new(column, row, tile_size, TileKind::Plain));
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn layout(obstacles: &[(i32, i32)]) -> TerrainLayout {
        TerrainLayout {
            obstacles: obstacles.iter().copied().collect(),
            enemy_spawns: BTreeSet::new(),
        }
    }

    #[test]
    fn test_neighbors_exclude_self_and_stay_adjacent() {
        let grid = Grid::new(5, 4, 70.0);
        for tile in grid.tiles() {
            for n in grid.neighbors(tile.column, tile.row) {
                assert_ne!(n.coords(), tile.coords());
                assert!((n.column - tile.column).abs() <= 1);
                assert!((n.row - tile.row).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_neighbors_clipped_at_corner() {
        let grid = Grid::new(5, 4, 70.0);
        assert_eq!(grid.neighbors(0, 0).count(), 3);
        assert_eq!(grid.neighbors(2, 2).count(), 8);
        assert_eq!(grid.neighbors(4, 1).count(), 5);
    }

    #[test]
    fn test_blocking_tile_has_no_neighbors() {
        let mut grid = Grid::new(5, 5, 70.0);
        grid.get_mut(2, 2).unwrap().kind = TileKind::Obstacle;
        assert_eq!(grid.neighbors(2, 2).count(), 0);
    }

    #[test]
    fn test_blocking_neighbor_is_still_reported() {
        let mut grid = Grid::new(5, 5, 70.0);
        grid.get_mut(2, 2).unwrap().kind = TileKind::Obstacle;
        assert!(grid.neighbors(1, 1).any(|t| t.coords() == (2, 2)));
    }

    #[test]
    fn test_tile_at_out_of_bounds() {
        let grid = Grid::new(24, 15, 70.0);
        assert!(grid.tile_at(23, 14).is_ok());
        assert_eq!(
            grid.tile_at(24, 0).unwrap_err(),
            GridError::OutOfBounds { column: 24, row: 0, width: 24, height: 15 }
        );
        assert!(grid.tile_at(0, -1).is_err());
    }

    #[test]
    fn test_directional_lookup_at_edges() {
        let grid = Grid::new(3, 3, 70.0);
        assert!(grid.tile_left(0, 1).is_none());
        assert!(grid.tile_up(1, 0).is_none());
        assert!(grid.tile_right(2, 1).is_none());
        assert!(grid.tile_down(1, 2).is_none());
        assert_eq!(grid.tile_left(1, 1).map(Tile::coords), Some((0, 1)));
        assert_eq!(grid.tile_down(1, 1).map(Tile::coords), Some((1, 2)));
    }

    #[test]
    fn test_generate_places_one_door_on_border() {
        let mut grid = Grid::new(24, 15, 70.0);
        let mut rng = StdRng::seed_from_u64(7);
        grid.generate(&layout(&[(3, 3), (4, 4)]), 0.1, &mut rng).unwrap();

        let doors: Vec<_> = grid.tiles().filter(|t| t.is_door()).collect();
        assert_eq!(doors.len(), 1);
        let (c, r) = doors[0].coords();
        assert!(c == 0 || r == 0 || c == 23 || r == 14);
        assert_eq!(grid.door(), Some((c, r)));
        assert!(!doors[0].is_blocking());
    }

    #[test]
    fn test_generate_marks_obstacles_and_traps() {
        let mut grid = Grid::new(6, 6, 70.0);
        let mut rng = StdRng::seed_from_u64(1);
        grid.generate(&layout(&[(2, 2), (3, 3)]), 1.0, &mut rng).unwrap();
        assert_eq!(grid.get(2, 2).unwrap().kind, TileKind::Trap { activated: false });

        grid.generate(&layout(&[(2, 2), (3, 3)]), 0.0, &mut rng).unwrap();
        assert_eq!(grid.get(2, 2).unwrap().kind, TileKind::Obstacle);
        assert_eq!(grid.get(3, 3).unwrap().kind, TileKind::Obstacle);
        assert_eq!(grid.get(1, 1).unwrap().kind, TileKind::Plain);
    }

    #[test]
    fn test_generate_without_door_candidate_keeps_old_grid() {
        let mut grid = Grid::new(3, 3, 70.0);
        let border: Vec<(i32, i32)> = grid
            .tiles()
            .filter(|t| t.coords() != (1, 1))
            .map(Tile::coords)
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let result = grid.generate(&layout(&border), 0.0, &mut rng);
        assert_eq!(result, Err(GridError::NoDoorCandidate));
        assert!(grid.tiles().all(|t| t.kind == TileKind::Plain));
    }

    #[test]
    fn test_out_of_range_trap_chance_is_an_error() {
        let mut grid = Grid::new(4, 4, 70.0);
        let mut rng = StdRng::seed_from_u64(2);
        for chance in [1.5, -0.1] {
            let result = grid.generate(&layout(&[(1, 1)]), chance, &mut rng);
            assert_eq!(result, Err(GridError::InvalidTrapChance));
        }
        assert_eq!(grid.door(), None);
    }

    #[test]
    fn test_open_door_is_idempotent() {
        let mut grid = Grid::new(4, 4, 70.0);
        let mut rng = StdRng::seed_from_u64(11);
        grid.generate(&layout(&[]), 0.0, &mut rng).unwrap();
        assert!(!grid.door_is_open());
        assert!(grid.open_door());
        assert!(!grid.open_door());
        assert!(grid.door_is_open());
    }

    #[test]
    fn test_loot_attaches_to_containing_tile() {
        let mut grid = Grid::new(4, 4, 70.0);
        let coords = grid.attach_loot(Loot::gold(5, Vec2::new(150.0, 80.0)));
        assert_eq!(coords, Some((2, 1)));
        assert_eq!(grid.take_loot(2, 1).len(), 1);
        assert!(grid.take_loot(2, 1).is_empty());
        assert_eq!(grid.attach_loot(Loot::gold(1, Vec2::new(-5.0, 0.0))), None);
    }
}
