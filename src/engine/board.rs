//! Mailbox position store.
//!
//! `Board` owns the 8×8 piece grid together with the side to move and the
//! en-passant window. It is a plain value: cloning deep-copies the grid, and
//! equality compares every square plus the turn and the window. Rule logic
//! lives in [`crate::engine::rules`]; `Board` only stores and hands out state.

use std::fmt;

use crate::engine::types::{Color, Piece, PieceKind, Square};

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The authoritative position: piece grid, side to move, en-passant window.
///
/// Row 0 holds White's back rank (rank 1), row 7 Black's. The grid is only
/// reachable through [`Square`]-indexed accessors, so out-of-range access is
/// unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    en_passant: Option<Square>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Board {
    /// An empty grid, White to move, no en-passant window.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            en_passant: None,
        }
    }

    /// The standard starting arrangement, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.setup_initial_position();
        board
    }

    fn setup_initial_position(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                self.squares[back][col] = Some(Piece::new(kind, color));
            }
            for col in 0..8 {
                self.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
    }

    /// Back to the standard starting arrangement, White to move.
    pub fn reset(&mut self) {
        *self = Board::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

impl Board {
    /// The piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// Place a piece on `sq`, or clear it with `None`.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hand the move to the other side.
    #[inline]
    pub fn advance_turn(&mut self) {
        self.side_to_move = !self.side_to_move;
    }

    /// The square a double-pushed pawn skipped over last ply, capturable en
    /// passant on this ply only.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Open or close the en-passant window. The executor recomputes this
    /// after every committed move.
    pub(crate) fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    /// Deep copy of the grid for display. Changes to the copy never reach
    /// the board.
    pub fn snapshot(&self) -> [[Option<Piece>; 8]; 8] {
        self.squares
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl Board {
    /// Human-readable diagram with rank 8 at the top.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for row in (0..8u8).rev() {
            s.push((b'1' + row) as char);
            s.push(' ');
            for col in 0..8u8 {
                let ch = match self.squares[row as usize][col as usize] {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                s.push(ch);
                if col < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
