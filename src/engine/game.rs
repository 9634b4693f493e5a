//! Stateful game facade over the board and the rules oracle.
//!
//! `Game` is the move executor: it validates through [`crate::engine::rules`],
//! commits each move atomically, recomputes the status for the side now to
//! move, and keeps the move history plus game metadata. It is the primary
//! type callers interact with.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::board::Board;
use crate::engine::notation;
use crate::engine::rules;
use crate::engine::types::{Color, GameStatus, IllegalMove, Piece, PieceKind, Square};

// =========================================================================
// MoveRecord
// =========================================================================

/// A committed move in the game history.
///
/// A record carries everything notation needs: the pre-move piece snapshot,
/// the captured piece if any (including the en-passant victim), the
/// special-move flags, and the check flags of the position it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    /// Captured piece, by displacement or en passant.
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    /// What the pawn became, on promotion moves only.
    pub promotion: Option<PieceKind>,
    /// The move left the opponent in check.
    pub is_check: bool,
    /// The move ended the game by checkmate.
    pub is_checkmate: bool,
}

impl MoveRecord {
    /// Algebraic rendering of this move (`"exd6"`, `"O-O"`, `"bxa8=Q+"`).
    pub fn to_algebraic(&self) -> String {
        notation::algebraic(self)
    }
}

// =========================================================================
// Game
// =========================================================================

/// A complete chess game: position, move history, status, and metadata.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    move_history: Vec<MoveRecord>,
    status: GameStatus,

    // Metadata
    pub id: String,
    pub white_player: String,
    pub black_player: String,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_players("White", "Black")
    }

    /// A new game with named players.
    pub fn with_players(white: impl Into<String>, black: impl Into<String>) -> Self {
        let game = Game {
            board: Board::new(),
            move_history: Vec::new(),
            status: GameStatus::Active,
            id: Uuid::new_v4().to_string(),
            white_player: white.into(),
            black_player: black.into(),
            created_at: Utc::now(),
        };
        info!(
            game_id = %game.id,
            white = %game.white_player,
            black = %game.black_player,
            "game created"
        );
        game
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move.
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Completed move history, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Whether the game accepts no further moves.
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Deep copy of the grid for display.
    pub fn snapshot(&self) -> [[Option<Piece>; 8]; 8] {
        self.board.snapshot()
    }

    /// Whether `from -> to` could be committed right now. False on finished
    /// games, mirroring [`Game::make_move`].
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        !self.is_game_over() && rules::is_legal(&self.board, from, to)
    }

    /// Every destination legal from `from`, for move hints. Empty on
    /// finished games.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.is_game_over() {
            return Vec::new();
        }
        rules::legal_destinations(&self.board, from)
    }

    // -----------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------

    /// Play a move. `promotion` picks the piece for a promoting pawn move;
    /// an absent or invalid choice becomes a queen.
    ///
    /// On success the committed record is returned and also appended to the
    /// history. Every failure, including moves on a finished game, is
    /// [`IllegalMove`] and leaves the game untouched.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, IllegalMove> {
        if self.status.is_game_over() {
            return Err(IllegalMove { from, to });
        }
        if !rules::is_legal(&self.board, from, to) {
            return Err(IllegalMove { from, to });
        }
        let Some(piece) = self.board.piece_at(from) else {
            return Err(IllegalMove { from, to });
        };

        // En passant: the victim sits one rank behind the destination.
        let is_en_passant =
            piece.kind == PieceKind::Pawn && self.board.en_passant_target() == Some(to);
        let mut captured = self.board.piece_at(to);
        if is_en_passant
            && let Some(victim_sq) = to.offset(-piece.color.forward(), 0)
        {
            captured = self.board.piece_at(victim_sq);
            self.board.set_piece(victim_sq, None);
        }

        // Castling: the rook jumps to the square the king crossed.
        let is_castling =
            piece.kind == PieceKind::King && (to.col() as i8 - from.col() as i8).abs() == 2;
        if is_castling {
            self.relocate_castling_rook(from, to);
        }

        // Promotion: reaching the far rank converts the pawn.
        let is_promotion =
            piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row();
        let placed = if is_promotion {
            let kind = promotion
                .filter(|kind| kind.is_promotion_target())
                .unwrap_or(PieceKind::Queen);
            Piece::new(kind, piece.color).moved()
        } else {
            piece.moved()
        };
        self.board.set_piece(to, Some(placed));
        self.board.set_piece(from, None);

        // A double push opens the en-passant window; anything else closes it.
        let window = if piece.kind == PieceKind::Pawn
            && (to.row() as i8 - from.row() as i8).abs() == 2
        {
            from.offset(piece.color.forward(), 0)
        } else {
            None
        };
        self.board.set_en_passant_target(window);

        // The status belongs to the side now to move.
        self.board.advance_turn();
        let status = rules::position_status(&self.board);
        self.status = status;

        let record = MoveRecord {
            from,
            to,
            piece,
            captured,
            is_en_passant,
            is_castling,
            promotion: if is_promotion { Some(placed.kind) } else { None },
            is_check: matches!(status, GameStatus::Check | GameStatus::Checkmate),
            is_checkmate: status == GameStatus::Checkmate,
        };
        self.move_history.push(record);

        debug!(
            game_id = %self.id,
            san = %record.to_algebraic(),
            status = %status,
            "move committed"
        );
        if status.is_game_over() {
            info!(game_id = %self.id, result = self.result_tag(), "game over");
        }
        Ok(record)
    }

    /// Move the rook half of a castling move. The king's relocation and the
    /// eligibility checks belong to the caller.
    fn relocate_castling_rook(&mut self, from: Square, to: Square) {
        let kingside = to.col() > from.col();
        let rook_col: i8 = if kingside { 7 } else { 0 };
        let rook_to_col = if kingside {
            to.col() as i8 - 1
        } else {
            to.col() as i8 + 1
        };
        if let Some(rook_from) = Square::new(from.row() as i8, rook_col)
            && let Some(rook_to) = Square::new(from.row() as i8, rook_to_col)
            && let Some(rook) = self.board.piece_at(rook_from)
        {
            self.board.set_piece(rook_from, None);
            self.board.set_piece(rook_to, Some(rook.moved()));
        }
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// The side to move resigns and the opponent wins. No effect once the
    /// game is already over.
    pub fn resign(&mut self) {
        if self.status.is_game_over() {
            return;
        }
        self.status = GameStatus::Resigned;
        info!(game_id = %self.id, loser = %self.side_to_move(), "resignation");
    }

    /// End the game as a draw by agreement. No effect once over.
    pub fn agree_draw(&mut self) {
        if self.status.is_game_over() {
            return;
        }
        self.status = GameStatus::Draw;
        info!(game_id = %self.id, "draw agreed");
    }

    /// Fresh board and empty history under the same id, players, and
    /// creation time.
    pub fn reset(&mut self) {
        self.board.reset();
        self.move_history.clear();
        self.status = GameStatus::Active;
        info!(game_id = %self.id, "game reset");
    }

    // -----------------------------------------------------------------
    // Result
    // -----------------------------------------------------------------

    /// Result tag for storage: `"1-0"`, `"0-1"`, `"1/2-1/2"`, or `"*"`
    /// while undecided. On checkmate and resignation the side to move is
    /// the loser.
    pub fn result_tag(&self) -> &'static str {
        match self.status {
            GameStatus::Checkmate | GameStatus::Resigned => match self.side_to_move() {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            GameStatus::Stalemate | GameStatus::Draw => "1/2-1/2",
            GameStatus::Active | GameStatus::Check => "*",
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
