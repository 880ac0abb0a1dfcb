//! Twenty48 core crate - fundamental types for the 2048 board engine.

mod board;
mod direction;
mod tile;

pub use board::Board;
pub use direction::{Direction, ParseDirectionError};
pub use tile::Tile;
