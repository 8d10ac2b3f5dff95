//! Input handling and player control.
//!
//! The simulation never reads a device directly; every tick it asks an
//! [`InputSource`] for a batch of [`InputEvent`]s. The headless runner drives
//! the player with [`Autopilot`], tests with [`ScriptedInput`].

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use crate::components::{AbilityCooldowns, AbilityKind, Facing, Health, Hitbox};
use crate::game::Game;
use crate::geometry::Direction;
use crate::occupancy;
use crate::pathfinding::{next_hop, Pathfinder, SearchMode};
use crate::room::RoomState;

/// One player intent for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Ability(AbilityKind),
    /// Toggle between running and paused
    Pause,
    Quit,
}

/// Anything that can produce player input, polled once per tick.
pub trait InputSource {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent>;
}

/// Replays a fixed list of per-tick batches, then produces nothing.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _game: &Game) -> Vec<InputEvent> {
        self.ticks.pop_front().unwrap_or_default()
    }
}

/// Plays the game on its own: hunts the nearest enemy, then heads for the
/// door once the room is cleared. Unlike enemies it walks shortest routes.
#[derive(Debug, Default)]
pub struct Autopilot {
    pathfinder: Pathfinder,
    last_center: Option<Vec2>,
    last_move: Option<Direction>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn target(&self, game: &Game, from: (i32, i32)) -> Option<(i32, i32)> {
        let room = &game.room;
        match room.state() {
            RoomState::Cleared => room.grid.door(),
            RoomState::Active => room
                .enemies()
                .iter()
                .filter(|&&e| game.world.get::<&Health>(e).is_ok_and(|h| !h.is_dead()))
                .filter_map(|&e| occupancy::entity_tile(&game.world, &room.grid, e))
                .min_by_key(|&(c, r)| (c - from.0).abs() + (r - from.1).abs()),
            RoomState::Generating | RoomState::Advancing => None,
        }
    }

    /// Direction toward `target`, switching axis if the last move went nowhere.
    fn heading(&mut self, center: Vec2, target: Vec2) -> Option<Direction> {
        let delta = target - center;
        let mut direction = Direction::from_delta(delta)?;
        let stuck = self.last_center == Some(center);
        if stuck && self.last_move == Some(direction) {
            let sideways = match direction {
                Direction::Left | Direction::Right => Vec2::new(0.0, delta.y),
                Direction::Up | Direction::Down => Vec2::new(delta.x, 0.0),
            };
            direction = Direction::from_delta(sideways).unwrap_or(direction.perpendicular()[0]);
        }
        self.last_center = Some(center);
        self.last_move = Some(direction);
        Some(direction)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent> {
        let world = &game.world;
        let grid = &game.room.grid;
        let Some(from) = occupancy::entity_tile(world, grid, game.player) else {
            return Vec::new();
        };
        let Ok(center) = world.get::<&Hitbox>(game.player).map(|h| h.center()) else {
            return Vec::new();
        };
        let Some(target) = self.target(game, from) else {
            return Vec::new();
        };
        let Some(target_center) = grid.get(target.0, target.1).map(|t| t.center()) else {
            return Vec::new();
        };

        let fighting = game.room.state() == RoomState::Active
            && (target.0 - from.0).abs() <= 1
            && (target.1 - from.1).abs() <= 1;
        if fighting {
            let mut events = Vec::new();
            let facing = world.get::<&Facing>(game.player).map(|f| f.0).ok();
            if let Some(toward) = Direction::from_delta(target_center - center) {
                if facing != Some(toward) {
                    events.push(InputEvent::Move(toward));
                }
            }
            let cooldowns = world
                .get::<&AbilityCooldowns>(game.player)
                .map(|c| *c)
                .unwrap_or_default();
            if let Some(ability) = AbilityKind::ALL.into_iter().find(|&a| cooldowns.is_ready(a)) {
                events.push(InputEvent::Ability(ability));
            }
            return events;
        }

        let route = self.pathfinder.find_route_with_mode(
            grid,
            from,
            target,
            &HashSet::new(),
            SearchMode::Shortest,
        );
        let hop_center = next_hop(&route)
            .and_then(|(c, r)| grid.get(c, r))
            .map(|t| t.center())
            .unwrap_or(target_center);
        self.heading(center, hop_center)
            .map(|d| vec![InputEvent::Move(d)])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::terrain::FixedTerrain;

    fn game_with_enemy(spawns: &[(i32, i32)]) -> Game {
        let oracle = FixedTerrain::new(&[], spawns);
        Game::new(GameConfig::default(), Box::new(oracle), 0, 7).unwrap()
    }

    #[test]
    fn test_scripted_input_replays_then_stops() {
        let game = game_with_enemy(&[]);
        let mut input = ScriptedInput::new([
            vec![InputEvent::Move(Direction::Left)],
            vec![InputEvent::Pause, InputEvent::Quit],
        ]);

        assert_eq!(input.poll(&game), vec![InputEvent::Move(Direction::Left)]);
        assert_eq!(input.poll(&game), vec![InputEvent::Pause, InputEvent::Quit]);
        assert!(input.is_finished());
        assert!(input.poll(&game).is_empty());
    }

    #[test]
    fn test_autopilot_walks_toward_far_enemy() {
        let game = game_with_enemy(&[(1, 7)]);
        let mut pilot = Autopilot::new();
        assert_eq!(pilot.poll(&game), vec![InputEvent::Move(Direction::Left)]);
    }

    #[test]
    fn test_autopilot_attacks_adjacent_enemy() {
        let mut game = game_with_enemy(&[(1, 7)]);
        let enemy = game.room.enemies()[0];
        let (sc, sr) = game.room.player_spawn();
        let next_to = game.room.grid.get(sc + 1, sr).unwrap().center();
        *game.world.get::<&mut Hitbox>(enemy).unwrap() = Hitbox::centered(next_to, 40.0);

        let mut pilot = Autopilot::new();
        // Player spawns facing right, straight at the enemy
        assert_eq!(pilot.poll(&game), vec![InputEvent::Ability(AbilityKind::Sweep)]);
    }

    #[test]
    fn test_autopilot_idles_with_nothing_to_do() {
        let mut game = game_with_enemy(&[]);
        // Empty room clears on the first tick; before that there is no target
        let mut pilot = Autopilot::new();
        assert!(pilot.poll(&game).is_empty());

        game.tick(&[]).unwrap();
        assert!(!pilot.poll(&game).is_empty());
    }
}
