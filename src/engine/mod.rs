pub mod board;
pub mod game;
pub mod notation;
pub mod rules;
pub mod types;

pub use board::Board;
pub use game::{Game, MoveRecord};
pub use rules::{is_legal, legal_destinations};
pub use types::*;
