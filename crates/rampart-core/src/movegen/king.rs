//! King move and castling generation.

use crate::attacks::king_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castling::CastleRights;
use crate::color::Color;
use crate::moves::Move;
use crate::square::Square;

use super::MoveList;

// Castling geometry, white's half; shift by 56 bits for black.
const OO_BETWEEN: Bitboard = Bitboard::new(0x60); // f1 g1
const OOO_BETWEEN: Bitboard = Bitboard::new(0x0E); // b1 c1 d1
const OOO_TRANSIT: Bitboard = Bitboard::new(0x0C); // c1 d1 (b1 may be attacked)

pub(super) fn king_moves(board: &Board, king_sq: Square, list: &mut MoveList) {
    let us = board.side_to_move();
    let friendly = board.side(us);
    let leg = board.legality();

    // The attack map was built with this king removed, so squares "behind"
    // the king on a checking ray are correctly marked unsafe.
    for to in king_attacks(king_sq) & !friendly & !leg.opponent_attacks() {
        list.push(Move::normal(king_sq, to));
    }

    // No castling out of check.
    if leg.in_check() {
        return;
    }

    let occupied = board.occupied();
    let unsafe_squares = leg.opponent_attacks();
    let (oo_right, ooo_right, shift) = match us {
        Color::White => (CastleRights::WHITE_OO, CastleRights::WHITE_OOO, 0),
        Color::Black => (CastleRights::BLACK_OO, CastleRights::BLACK_OOO, 56),
    };

    if board.castling().contains(oo_right) {
        let between = OO_BETWEEN << shift;
        if (occupied & between).none() && (unsafe_squares & between).none() {
            let to = Square::from_index(king_sq.index() as u8 + 2).expect("g-file square");
            list.push(Move::castle(king_sq, to));
        }
    }
    if board.castling().contains(ooo_right) {
        let between = OOO_BETWEEN << shift;
        let transit = OOO_TRANSIT << shift;
        if (occupied & between).none() && (unsafe_squares & transit).none() {
            let to = Square::from_index(king_sq.index() as u8 - 2).expect("c-file square");
            list.push(Move::castle(king_sq, to));
        }
    }
}
