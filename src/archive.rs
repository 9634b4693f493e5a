//! Saved-game interchange.
//!
//! The archive is the persistence collaborator's surface: a game serialized
//! as the move list that produced it, plus the result tag and metadata.
//! Positions themselves are deliberately not serialized. [`replay`] rebuilds
//! a [`Game`] by feeding the stored moves back through [`Game::make_move`]
//! with full re-validation, so a reconstructed position can only ever be the
//! product of legal moves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::game::Game;
use crate::engine::types::{IllegalMove, PieceKind, Square};

// ---------------------------------------------------------------------------
// Archive models
// ---------------------------------------------------------------------------

/// A complete saved game: metadata, result tag, and the move list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameArchive {
    pub id: String,
    pub white_player: String,
    pub black_player: String,
    /// `"1-0"`, `"0-1"`, `"1/2-1/2"`, or `"*"`.
    pub result: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub moves: Vec<ArchivedMove>,
}

/// One committed move: coordinates to replay it, notation to display it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedMove {
    pub from: String,
    pub to: String,
    /// Promotion letter (`"Q"`, `"N"`, ...) on promotion moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    pub san: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while replaying a stored move list. `ply` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("move {ply}: invalid square in '{from}' -> '{to}'")]
    InvalidSquare {
        ply: usize,
        from: String,
        to: String,
    },

    #[error("move {ply}: invalid promotion piece '{piece}'")]
    InvalidPromotion { ply: usize, piece: String },

    #[error("move {ply}: {source}")]
    Illegal {
        ply: usize,
        #[source]
        source: IllegalMove,
    },
}

// ---------------------------------------------------------------------------
// Archiving
// ---------------------------------------------------------------------------

/// Capture `game` as a serializable archive.
pub fn archive(game: &Game) -> GameArchive {
    GameArchive {
        id: game.id.clone(),
        white_player: game.white_player.clone(),
        black_player: game.black_player.clone(),
        result: game.result_tag().to_string(),
        created_at: game.created_at.to_rfc3339(),
        moves: game
            .move_history()
            .iter()
            .map(|record| ArchivedMove {
                from: record.from.to_algebraic(),
                to: record.to.to_algebraic(),
                promotion: record
                    .promotion
                    .and_then(PieceKind::letter)
                    .map(String::from),
                san: record.to_algebraic(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Rebuild a game by replaying `archive` through the executor, move by
/// move. Every move is re-validated; the status and result come back from
/// play, never from the stored tag. A decisive stored result over a
/// position the moves leave undecided is reapplied as the resignation or
/// agreed draw it must have been.
pub fn replay(archive: &GameArchive) -> Result<Game, ReplayError> {
    let mut game = Game::with_players(
        archive.white_player.clone(),
        archive.black_player.clone(),
    );
    game.id = archive.id.clone();
    if let Ok(created_at) = DateTime::parse_from_rfc3339(&archive.created_at) {
        game.created_at = created_at.with_timezone(&Utc);
    }

    for (idx, mv) in archive.moves.iter().enumerate() {
        let ply = idx + 1;
        let (Some(from), Some(to)) = (
            Square::from_algebraic(&mv.from),
            Square::from_algebraic(&mv.to),
        ) else {
            return Err(ReplayError::InvalidSquare {
                ply,
                from: mv.from.clone(),
                to: mv.to.clone(),
            });
        };
        let promotion = match mv.promotion.as_deref() {
            None => None,
            Some(text) => {
                let mut chars = text.chars();
                let kind = match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        PieceKind::from_letter(c).filter(|kind| kind.is_promotion_target())
                    }
                    _ => None,
                };
                let Some(kind) = kind else {
                    return Err(ReplayError::InvalidPromotion {
                        ply,
                        piece: text.to_string(),
                    });
                };
                Some(kind)
            }
        };
        game.make_move(from, to, promotion)
            .map_err(|source| ReplayError::Illegal { ply, source })?;
    }

    if !game.is_game_over() {
        match archive.result.as_str() {
            "1-0" | "0-1" => game.resign(),
            "1/2-1/2" => game.agree_draw(),
            _ => {}
        }
    }

    debug!(game_id = %game.id, moves = archive.moves.len(), "game replayed");
    Ok(game)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
