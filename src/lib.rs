//! Single-room-at-a-time tile roguelike core.
//!
//! A rectangular [`grid::Grid`] of tiles, actors in a `hecs` world whose tile
//! is derived from their hitbox, a greedy best-first [`pathfinding::Pathfinder`]
//! for enemies, and a [`room::Room`] lifecycle that rebuilds the grid each time
//! the player walks through the door.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod occupancy;
pub mod pathfinding;
pub mod render;
pub mod room;
pub mod spawning;
pub mod systems;
pub mod terrain;
pub mod tile;
pub mod wallet;
