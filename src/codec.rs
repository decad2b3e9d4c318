//! Bit-exact single-byte move codes.
//!
//! Transcripts and the engine boundary both speak this format, so it must
//! never change.
//!
//! ## Layout
//!
//! ```text
//! wall:  1 o rrr ccc     o = 1 horizontal, rrr/ccc = anchor row/col
//! pawn:  0 x RR s t CC   RR/CC = |d_row|/|d_col|, s/t = sign of d_row/d_col (1 = positive)
//! ```
//!
//! Bit 6 of a pawn code is unused. A sign bit paired with a zero magnitude
//! carries no meaning and is ignored.
//!
//! `decode` is total: every byte maps to some move, legal or not.
//! `decode_checked` additionally rejects codes that cannot describe any pawn
//! move or any wall on a given board.

use crate::core::{EngineError, Move, Orientation, Result, WallSlot, MAX_ANCHOR};

const WALL_FLAG: u8 = 0x80;
const HORIZONTAL_FLAG: u8 = 0x40;
const ROW_SIGN: u8 = 0x08;
const COL_SIGN: u8 = 0x04;

/// Encode a move. Panics on deltas outside `-2..=2` or anchors above 7.
#[must_use]
pub fn encode(mv: Move) -> u8 {
    match mv {
        Move::WallPlacement(slot) => {
            assert!(
                slot.row <= MAX_ANCHOR && slot.col <= MAX_ANCHOR,
                "Wall anchor {} out of encodable range",
                slot
            );
            let orientation = if slot.orientation.is_horizontal() {
                HORIZONTAL_FLAG
            } else {
                0
            };
            WALL_FLAG | orientation | (slot.row << 3) | slot.col
        }
        Move::PawnStep { d_row, d_col } => {
            assert!(
                (-2..=2).contains(&d_row) && (-2..=2).contains(&d_col),
                "Pawn delta ({}, {}) out of encodable range",
                d_row,
                d_col
            );
            let mut code = (d_row.unsigned_abs() << 4) | d_col.unsigned_abs();
            if d_row > 0 {
                code |= ROW_SIGN;
            }
            if d_col > 0 {
                code |= COL_SIGN;
            }
            code
        }
    }
}

/// Decode any byte into a move without validation.
#[must_use]
pub fn decode(code: u8) -> Move {
    if code & WALL_FLAG != 0 {
        let orientation = if code & HORIZONTAL_FLAG != 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        return Move::WallPlacement(WallSlot::new(orientation, (code >> 3) & 7, code & 7));
    }

    let signed = |magnitude: u8, positive: bool| {
        let magnitude = magnitude as i8;
        if positive {
            magnitude
        } else {
            -magnitude
        }
    };
    Move::PawnStep {
        d_row: signed((code >> 4) & 3, code & ROW_SIGN != 0),
        d_col: signed(code & 3, code & COL_SIGN != 0),
    }
}

/// Decode a byte, rejecting codes that describe no move on a `board_size` board.
pub fn decode_checked(code: u8, board_size: u8) -> Result<Move> {
    let malformed = |reason| EngineError::MalformedCode { code, reason };
    let mv = decode(code);
    match mv {
        Move::WallPlacement(slot) => {
            if !slot.in_bounds(board_size) {
                return Err(malformed("wall anchor outside the board"));
            }
        }
        Move::PawnStep { d_row, d_col } => {
            if code & HORIZONTAL_FLAG != 0 {
                return Err(malformed("unused bit 6 set on a pawn code"));
            }
            match (d_row.unsigned_abs(), d_col.unsigned_abs()) {
                (0, 0) => return Err(malformed("pawn move without displacement")),
                (1, 0) | (0, 1) | (2, 0) | (0, 2) | (1, 1) => {}
                (3, _) | (_, 3) => return Err(malformed("pawn magnitude 3")),
                _ => return Err(malformed("no pawn move has this shape")),
            }
        }
    }
    Ok(mv)
}

/// Encode a list of moves.
#[must_use]
pub fn encode_all(moves: &[Move]) -> Vec<u8> {
    moves.iter().copied().map(encode).collect()
}
