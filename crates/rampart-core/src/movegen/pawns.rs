//! Pawn move generation: pushes, captures, promotions, en passant.

use crate::attacks::{pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::moves::{Move, Promotion};
use crate::piece::PieceKind;
use crate::square::Square;

use super::MoveList;

/// The push origin for a pawn that landed on `to`.
#[inline]
fn push_origin(to: Square, advance: i8) -> Square {
    Square::from_index((to.index() as i8 - advance) as u8).expect("push origin is on the board")
}

pub(super) fn pawn_moves(board: &Board, king_sq: Square, check_mask: Bitboard, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let leg = board.legality();
    let empty = board.empty_squares();
    let enemy = board.side(them);
    let pawns = board.pieces_of(us, PieceKind::Pawn);

    let (advance, promo_rank, double_rank) = match us {
        Color::White => (8i8, Bitboard::RANK_8, Bitboard::RANK_4),
        Color::Black => (-8i8, Bitboard::RANK_1, Bitboard::RANK_5),
    };
    let forward = |bb: Bitboard| match us {
        Color::White => bb << 8,
        Color::Black => bb >> 8,
    };
    let pin_allows = |from: Square, to: Square| -> bool {
        !leg.pinned().contains(from) || leg.pin_ray(from).contains(to)
    };

    // Pushes. The advanced bitboard is built for all pawns at once; origins
    // are recovered arithmetically.
    let single = forward(pawns) & empty;
    for to in single & check_mask & !promo_rank {
        let from = push_origin(to, advance);
        if pin_allows(from, to) {
            list.push(Move::normal(from, to));
        }
    }
    for to in single & check_mask & promo_rank {
        let from = push_origin(to, advance);
        if pin_allows(from, to) {
            for promo in Promotion::ALL {
                list.push(Move::new_promotion(from, to, promo));
            }
        }
    }
    for to in forward(single) & empty & double_rank & check_mask {
        let from = push_origin(push_origin(to, advance), advance);
        if pin_allows(from, to) {
            list.push(Move::normal(from, to));
        }
    }

    // Captures.
    for from in pawns {
        let targets = pawn_attacks(us, from) & enemy & check_mask;
        for to in targets {
            if !pin_allows(from, to) {
                continue;
            }
            if promo_rank.contains(to) {
                for promo in Promotion::ALL {
                    list.push(Move::new_promotion(from, to, promo));
                }
            } else {
                list.push(Move::normal(from, to));
            }
        }
    }

    // En passant. The captured pawn sits behind the target square.
    if let Some(ep_sq) = board.en_passant() {
        let victim_sq = push_origin(ep_sq, advance);
        for from in pawn_attacks(them, ep_sq) & pawns {
            // In check the capture must resolve it, either by landing on the
            // block mask or by removing the checking pawn itself. Out of
            // check the mask is full and both tests pass trivially.
            if !(check_mask.contains(ep_sq) || check_mask.contains(victim_sq)) {
                continue;
            }
            if !pin_allows(from, ep_sq) {
                continue;
            }
            // Both pawns leave their shared rank at once, which an ordinary
            // pin scan cannot see. Probe the king's orthogonal rays on the
            // occupancy as it would stand after the capture.
            let after = (board.occupied() ^ from.bb() ^ victim_sq.bb()) | ep_sq.bb();
            let orthogonal =
                board.pieces_of(them, PieceKind::Rook) | board.pieces_of(them, PieceKind::Queen);
            if (rook_attacks(king_sq, after) & orthogonal).any() {
                continue;
            }
            list.push(Move::en_passant(from, ep_sq));
        }
    }
}
