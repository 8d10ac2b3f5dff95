//! Core game state - owns the simulation data and runs one tick at a time.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::{AnimState, Health, Wallet};
use crate::config::GameConfig;
use crate::error::GridError;
use crate::events::{EventQueue, GameEvent};
use crate::input::InputEvent;
use crate::pathfinding::Pathfinder;
use crate::room::{self, Room};
use crate::spawning::spawn_player;
use crate::systems;
use crate::terrain::TerrainOracle;

/// Where the run as a whole stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    /// The player's health reached zero; ticks no longer advance the world
    PlayerDead,
    Quit,
}

/// Core game state - owns all simulation data.
pub struct Game {
    /// The ECS world
    pub world: World,

    /// Current room, including its grid
    pub room: Room,

    /// Player entity handle, kept across rooms
    pub player: Entity,

    pub config: GameConfig,

    state: GameState,
    ticks: u64,
    rooms_cleared: u32,
    pathfinder: Pathfinder,
    oracle: Box<dyn TerrainOracle>,
    events: EventQueue,
    rng: StdRng,
}

impl Game {
    /// Build the first room and place the player on its spawn tile.
    pub fn new(
        config: GameConfig,
        mut oracle: Box<dyn TerrainOracle>,
        gold: u32,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let room = Room::generate(
            &mut world,
            oracle.as_mut(),
            &config,
            config.room.difficulty_start,
            &mut rng,
        )?;
        let player = spawn_player(
            &mut world,
            room.player_spawn_center(),
            config.player.health,
            config.player.speed,
            gold,
        );

        Ok(Self {
            world,
            room,
            player,
            config,
            state: GameState::Running,
            ticks: 0,
            rooms_cleared: 0,
            pathfinder: Pathfinder::new(),
            oracle,
            events: EventQueue::new(),
            rng,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Ticks actually simulated; paused ticks do not count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn rooms_cleared(&self) -> u32 {
        self.rooms_cleared
    }

    pub fn difficulty(&self) -> f32 {
        self.room.difficulty
    }

    pub fn gold(&self) -> u32 {
        self.world.get::<&Wallet>(self.player).map(|w| w.gold).unwrap_or(0)
    }

    pub fn player_health(&self) -> Health {
        self.world
            .get::<&Health>(self.player)
            .map(|h| *h)
            .unwrap_or(Health { current: 0, max: 0 })
    }

    /// Run one simulation tick with this tick's input batch.
    ///
    /// Order: input, traps, loot, enemy ai, win check, advance check.
    /// Returns every event emitted along the way. A failed room build is
    /// returned as an error and leaves the current room in place.
    pub fn tick(&mut self, inputs: &[InputEvent]) -> Result<Vec<GameEvent>, GridError> {
        puffin::profile_function!();

        for input in inputs {
            match (input, self.state) {
                (InputEvent::Quit, _) => self.state = GameState::Quit,
                (InputEvent::Pause, GameState::Running) => self.state = GameState::Paused,
                (InputEvent::Pause, GameState::Paused) => self.state = GameState::Running,
                _ => {}
            }
        }
        if self.state != GameState::Running {
            return Ok(self.events.drain().collect());
        }
        self.ticks += 1;

        {
            puffin::profile_scope!("player");
            self.player_turn(inputs);
        }

        let trap_damage = self.config.player.trap_damage;
        systems::trigger_traps(
            &mut self.world,
            &mut self.room.grid,
            self.player,
            trap_damage,
            &mut self.events,
        );
        systems::collect_loot(&mut self.world, &mut self.room.grid, self.player, &mut self.events);

        if !self.check_player_alive() {
            return Ok(self.events.drain().collect());
        }

        systems::update_enemies(
            &mut self.world,
            &self.room.grid,
            self.player,
            &mut self.pathfinder,
            &mut self.events,
        );

        if !self.check_player_alive() {
            return Ok(self.events.drain().collect());
        }

        self.room.check_win(&self.world, &mut self.events);

        if self.room.player_at_door(&self.world, self.player) {
            let next = room::advance(
                &mut self.world,
                &mut self.room,
                self.player,
                self.oracle.as_mut(),
                &self.config,
                &mut self.events,
                &mut self.rng,
            )?;
            self.room = next;
            self.rooms_cleared += 1;
        }

        Ok(self.events.drain().collect())
    }

    fn player_turn(&mut self, inputs: &[InputEvent]) {
        systems::tick_cooldowns(&mut self.world);

        let mut acted = false;
        for input in inputs {
            match *input {
                InputEvent::Move(direction) => {
                    systems::move_actor(&mut self.world, &self.room.grid, self.player, direction);
                    acted = true;
                }
                InputEvent::Ability(ability) => {
                    acted |= systems::use_ability(
                        &mut self.world,
                        &mut self.room.grid,
                        self.player,
                        ability,
                        self.room.difficulty,
                        &mut self.rng,
                        &mut self.events,
                    );
                }
                InputEvent::Pause | InputEvent::Quit => {}
            }
        }

        if !acted {
            if let Ok(mut anim) = self.world.get::<&mut AnimState>(self.player) {
                *anim = AnimState::Idle;
            }
        }
    }

    /// Flip to `PlayerDead` the first time the player's health runs out.
    fn check_player_alive(&mut self) -> bool {
        if !self.player_health().is_dead() {
            return true;
        }
        if let Ok(mut anim) = self.world.get::<&mut AnimState>(self.player) {
            *anim = AnimState::Dead;
        }
        log::info!(
            "player died after {} ticks, {} rooms cleared",
            self.ticks,
            self.rooms_cleared
        );
        self.events.push(GameEvent::PlayerDied);
        self.state = GameState::PlayerDead;
        false
    }
}
