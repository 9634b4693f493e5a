//! A chess rules engine: board state, per-piece move legality, game flow
//! with check and mate detection, and saved-game replay. Legality is a pure
//! oracle over positions; a [`Game`] applies validated moves and keeps the
//! record each move needs for notation and archiving.

pub mod archive;
pub mod engine;

pub use engine::board::Board;
pub use engine::game::{Game, MoveRecord};
pub use engine::types::{Color, GameStatus, IllegalMove, Piece, PieceKind, Square};
