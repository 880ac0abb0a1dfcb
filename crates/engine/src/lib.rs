//! twenty48-engine - gameplay session logic above the core board.
//!
//! Provides random tile spawning with an injected RNG and the `Game`
//! session type that seeds, steps, and resets a board.

pub mod game;
pub mod spawn;

pub use game::{Game, StepResult};
pub use spawn::{spawn_random_tile, FOUR_PROBABILITY};
