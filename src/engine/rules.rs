//! Move legality: the pure rules oracle.
//!
//! Everything here reads a [`Board`] and never mutates it. "What if"
//! questions run on a transient copy of the board, so a legality query can
//! never disturb live state. [`is_legal`] is the single entry point the move
//! executor trusts; the per-kind shape rules, path walking, check detection,
//! and terminal-status evaluation below all serve it.

use crate::engine::board::Board;
use crate::engine::types::{Color, GameStatus, Piece, PieceKind, Square};

// ---------------------------------------------------------------------------
// Legality
// ---------------------------------------------------------------------------

/// Whether `from -> to` is fully legal for the side to move.
///
/// The preconditions run in order, each failure answering `false`: a piece
/// of the side to move stands on `from`; `from` and `to` differ; `to` holds
/// no same-color piece; the piece's shape rule accepts the move; and the
/// move would not leave the mover's own king in check.
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color != board.side_to_move() {
        return false;
    }
    if from == to {
        return false;
    }
    if let Some(target) = board.piece_at(to)
        && target.color == piece.color
    {
        return false;
    }
    if !move_shape_ok(board, from, to, piece) {
        return false;
    }
    !would_leave_king_in_check(board, from, to, piece.color)
}

/// Every destination legal from `from`, in board order. Empty when `from`
/// is empty, holds the idle side, or the piece is simply stuck.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal(board, from, to))
        .collect()
}

/// Whether the side to move has at least one legal move. Exits on the
/// first hit.
pub fn has_any_legal_move(board: &Board) -> bool {
    Square::all().any(|from| {
        board
            .piece_at(from)
            .is_some_and(|piece| piece.color == board.side_to_move())
            && Square::all().any(|to| is_legal(board, from, to))
    })
}

// ---------------------------------------------------------------------------
// Per-kind shape rules
// ---------------------------------------------------------------------------

/// Row and column deltas of `from -> to`.
#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Per-kind geometry and occupancy, castling included. Assumes the turn
/// and same-color-destination preconditions already passed.
fn move_shape_ok(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_shape_ok(board, from, to, piece.color),
        PieceKind::Knight => knight_shape_ok(from, to),
        PieceKind::Bishop => bishop_shape_ok(board, from, to),
        PieceKind::Rook => rook_shape_ok(board, from, to),
        PieceKind::Queen => bishop_shape_ok(board, from, to) || rook_shape_ok(board, from, to),
        PieceKind::King => king_shape_ok(board, from, to, piece),
    }
}

/// Shape rule used by check scans. Identical to [`move_shape_ok`] except
/// the king arm is the plain one-step rule: castling can never deliver an
/// attack, and leaving it out keeps check detection non-recursive.
fn attack_shape_ok(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    match piece.kind {
        PieceKind::King => {
            let (dr, dc) = deltas(from, to);
            dr.abs() <= 1 && dc.abs() <= 1
        }
        _ => move_shape_ok(board, from, to, piece),
    }
}

fn pawn_shape_ok(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let (dr, dc) = deltas(from, to);
    let dir = color.forward();

    // Straight pushes never capture.
    if dc == 0 {
        if board.piece_at(to).is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        if from.row() == color.pawn_start_row() && dr == 2 * dir {
            return from
                .offset(dir, 0)
                .is_some_and(|mid| board.piece_at(mid).is_none());
        }
        return false;
    }

    // One step diagonally forward: a capture, or the en-passant window.
    if dc.abs() == 1 && dr == dir {
        if board
            .piece_at(to)
            .is_some_and(|target| target.color != color)
        {
            return true;
        }
        return board.en_passant_target() == Some(to);
    }
    false
}

fn knight_shape_ok(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    let (dr, dc) = (dr.abs(), dc.abs());
    (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
}

fn bishop_shape_ok(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr != 0 && dr.abs() == dc.abs() && path_clear(board, from, to)
}

fn rook_shape_ok(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    ((dr == 0) != (dc == 0)) && path_clear(board, from, to)
}

fn king_shape_ok(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr.abs() <= 1 && dc.abs() <= 1 {
        return true;
    }
    if !piece.has_moved && dr == 0 && dc.abs() == 2 {
        return can_castle(board, from, to, piece.color);
    }
    false
}

/// Whether the squares strictly between `from` and `to` are all empty.
/// The endpoints must share a rank, file, or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from;
    loop {
        current = match current.offset(step_r, step_c) {
            Some(sq) => sq,
            None => return false,
        };
        if current == to {
            return true;
        }
        if board.piece_at(current).is_some() {
            return false;
        }
    }
}

// ---------------------------------------------------------------------------
// Castling
// ---------------------------------------------------------------------------

/// Castling eligibility for a two-column king move. The caller has already
/// established the shape and that the king never moved.
///
/// Requires an own unmoved rook on the corner of the chosen side, an empty
/// path between king and rook, and a king that is neither in check nor
/// crossing an attacked square. The landing square is covered by the final
/// self-check precondition of [`is_legal`].
fn can_castle(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let kingside = to.col() > from.col();
    let rook_col: i8 = if kingside { 7 } else { 0 };
    let Some(rook_sq) = Square::new(from.row() as i8, rook_col) else {
        return false;
    };
    let Some(rook) = board.piece_at(rook_sq) else {
        return false;
    };
    if rook.kind != PieceKind::Rook || rook.color != color || rook.has_moved {
        return false;
    }
    if !path_clear(board, from, rook_sq) {
        return false;
    }

    // Origin first (plain check), then the crossed square.
    let step = if kingside { 1 } else { -1 };
    for dc in [0, step] {
        let Some(transit) = from.offset(0, dc) else {
            return false;
        };
        if would_leave_king_in_check(board, from, transit, color) {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Check detection
// ---------------------------------------------------------------------------

/// The square of `color`'s king, if that king is on the board.
fn find_king(board: &Board, color: Color) -> Option<Square> {
    Square::all().find(|&sq| {
        board
            .piece_at(sq)
            .is_some_and(|piece| piece.kind == PieceKind::King && piece.color == color)
    })
}

/// Whether `color`'s king is attacked. A board without that king is not in
/// check, so free-standing test positions stay valid inputs.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king_sq) => square_attacked_by(board, king_sq, !color),
        None => false,
    }
}

/// Whether any piece of `attacker` could capture onto `target` by shape.
fn square_attacked_by(board: &Board, target: Square, attacker: Color) -> bool {
    Square::all().any(|from| {
        board.piece_at(from).is_some_and(|piece| {
            piece.color == attacker && attack_shape_ok(board, from, target, piece)
        })
    })
}

/// Whether relocating `from -> to` would leave `color`'s king attacked.
///
/// The relocation is played on a copy, clearing `from` before filling `to`,
/// so the degenerate `from == to` probe reduces to a plain in-check test.
/// The caller's board is never touched.
pub fn would_leave_king_in_check(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let mut copy = board.clone();
    let moving = copy.piece_at(from);
    copy.set_piece(from, None);
    copy.set_piece(to, moving);
    is_in_check(&copy, color)
}

// ---------------------------------------------------------------------------
// Terminal status
// ---------------------------------------------------------------------------

/// Status of the position for the side to move.
///
/// Check and move-availability are each evaluated exactly once: checkmate is
/// check with no legal move, stalemate no check with no legal move.
pub fn position_status(board: &Board) -> GameStatus {
    let in_check = is_in_check(board, board.side_to_move());
    if !has_any_legal_move(board) {
        if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Active
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
