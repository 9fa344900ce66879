//! Knight move generation.

use crate::attacks::knight_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::piece::PieceKind;

use super::MoveList;

pub(super) fn knight_moves(board: &Board, check_mask: Bitboard, list: &mut MoveList) {
    let us = board.side_to_move();
    let friendly = board.side(us);
    let pinned = board.legality().pinned();

    // A pinned knight never has a legal move: no knight jump stays on a ray.
    for from in board.pieces_of(us, PieceKind::Knight) & !pinned {
        for to in knight_attacks(from) & !friendly & check_mask {
            list.push(Move::normal(from, to));
        }
    }
}
