//! Bishop, rook, and queen move generation.

use crate::attacks::{bishop_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::piece::PieceKind;
use crate::square::Square;

use super::MoveList;

pub(super) fn slider_moves(board: &Board, check_mask: Bitboard, list: &mut MoveList) {
    gen_kind(board, check_mask, list, PieceKind::Bishop, bishop_attacks);
    gen_kind(board, check_mask, list, PieceKind::Rook, rook_attacks);
    gen_kind(board, check_mask, list, PieceKind::Queen, queen_attacks);
}

fn gen_kind(
    board: &Board,
    check_mask: Bitboard,
    list: &mut MoveList,
    kind: PieceKind,
    attacks: fn(Square, Bitboard) -> Bitboard,
) {
    let us = board.side_to_move();
    let friendly = board.side(us);
    let occupied = board.occupied();
    let leg = board.legality();

    for from in board.pieces_of(us, kind) {
        let mut targets = attacks(from, occupied) & !friendly & check_mask;
        if leg.pinned().contains(from) {
            targets &= leg.pin_ray(from);
        }
        for to in targets {
            list.push(Move::normal(from, to));
        }
    }
}
