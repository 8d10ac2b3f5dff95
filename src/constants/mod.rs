//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod combat;
mod enemies;
mod gameplay;
mod grid;
mod terrain;

pub use combat::*;
pub use enemies::*;
pub use gameplay::*;
pub use grid::*;
pub use terrain::*;
