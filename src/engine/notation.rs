//! Algebraic notation rendering.
//!
//! Renders committed [`MoveRecord`]s in the plain algebraic dialect the
//! engine's collaborators store and display: `O-O`/`O-O-O` for castling, a
//! piece letter for non-pawns, the origin file on pawn captures, `x` on
//! captures, `=Q` on promotion, and a trailing `#` or `+`. Notation is only
//! ever rendered, never parsed, and origin-square disambiguation beyond the
//! pawn-capture file is not emitted.

use crate::engine::game::MoveRecord;
use crate::engine::types::PieceKind;

/// Render a committed move: `"e4"`, `"Nf3"`, `"exd6"`, `"O-O-O"`,
/// `"bxa8=Q+"`, `"Qxf7#"`.
pub fn algebraic(record: &MoveRecord) -> String {
    // Castling is its own complete production, no suffixes.
    if record.is_castling {
        return if record.to.col() > record.from.col() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut san = String::new();
    if let Some(letter) = record.piece.kind.letter() {
        san.push(letter);
    }
    if record.captured.is_some() || record.is_en_passant {
        if record.piece.kind == PieceKind::Pawn {
            san.push(record.from.file_char());
        }
        san.push('x');
    }
    san.push_str(&record.to.to_algebraic());
    if let Some(kind) = record.promotion
        && let Some(letter) = kind.letter()
    {
        san.push('=');
        san.push(letter);
    }
    if record.is_checkmate {
        san.push('#');
    } else if record.is_check {
        san.push('+');
    }
    san
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
