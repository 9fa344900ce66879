//! Reversible move execution.
//!
//! `make_move` mutates the board in place and pushes a [`StateDelta`]
//! holding everything that cannot be recomputed from the move alone; the
//! matching `unmake_move` pops it and restores the position bit for bit,
//! legality cache included.

use crate::analysis::Legality;
use crate::board::Board;
use crate::castling::CastleRights;
use crate::color::Color;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Everything needed to reverse one move.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StateDelta {
    /// The captured piece and the square it stood on. For en passant the
    /// square is behind the destination, not the destination itself.
    captured: Option<(Piece, Square)>,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    /// The legality cache as it was before the move, restored verbatim on
    /// unmake instead of being recomputed.
    legality: Legality,
}

/// Castling rights lost when a move touches the given square, as origin or
/// destination. Covers king moves, rook moves, and captures of a rook still
/// on its corner.
const RIGHTS_LOST: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_OOO;
    table[Square::H1.index()] = CastleRights::WHITE_OO;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_OOO;
    table[Square::H8.index()] = CastleRights::BLACK_OO;
    table
};

/// The rook's origin and destination for a castling move, keyed by the
/// king's destination square.
fn castle_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        Square::G1 => Some((Square::H1, Square::F1)),
        Square::C1 => Some((Square::A1, Square::D1)),
        Square::G8 => Some((Square::H8, Square::F8)),
        Square::C8 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

impl Board {
    /// Apply a move produced by the generator for this position.
    ///
    /// Passing anything else is a logic error; the board stays untouched if
    /// the origin square is empty, but no other misuse is detected.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move();
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();

        let Some(mover) = self.piece_on(from) else {
            debug_assert!(false, "make_move from an empty square: {mv}");
            return;
        };

        // Identify the capture before any bitboard changes. Castling never
        // captures even though the king crosses occupied territory.
        let captured = if mv.is_en_passant() {
            let behind = if us == Color::White { -8 } else { 8 };
            to.shifted(behind)
                .map(|sq| (Piece::new(them, PieceKind::Pawn), sq))
        } else if mv.is_castle() {
            None
        } else {
            self.piece_on(to).map(|piece| (piece, to))
        };

        self.push_delta(StateDelta {
            captured,
            castling: self.castling(),
            en_passant: self.en_passant(),
            halfmove_clock: self.halfmove_clock(),
            legality: *self.legality(),
        });

        self.toggle(from, mover);
        if let Some((victim, victim_sq)) = captured {
            self.toggle(victim_sq, victim);
        }
        if mv.is_castle()
            && let Some((rook_from, rook_to)) = castle_rook_squares(to)
        {
            let rook = Piece::new(us, PieceKind::Rook);
            self.toggle(rook_from, rook);
            self.toggle(rook_to, rook);
        }
        let placed = match mv.promotion() {
            Some(promo) => Piece::new(us, promo.kind()),
            None => mover,
        };
        self.toggle(to, placed);

        let rights = self
            .castling()
            .revoke(RIGHTS_LOST[from.index()])
            .revoke(RIGHTS_LOST[to.index()]);
        self.set_castling(rights);

        // A fresh en-passant target appears only after a double push.
        let double_push = mover.kind() == PieceKind::Pawn && from.index().abs_diff(to.index()) == 16;
        self.set_en_passant(if double_push {
            Square::from_index(((from.index() + to.index()) / 2) as u8)
        } else {
            None
        });

        if mover.kind() == PieceKind::Pawn || captured.is_some() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock() + 1);
        }
        self.set_side_to_move(them);
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number() + 1);
        }

        self.refresh_legality();
    }

    /// Reverse the most recent [`make_move`](Board::make_move), which must
    /// have applied `mv`.
    pub fn unmake_move(&mut self, mv: Move) {
        let Some(delta) = self.pop_delta() else {
            debug_assert!(false, "unmake_move with an empty undo stack: {mv}");
            return;
        };

        let us = self.side_to_move().opposite();
        self.set_side_to_move(us);

        let from = mv.from();
        let to = mv.to();

        let Some(placed) = self.piece_on(to) else {
            debug_assert!(false, "unmake_move found no piece on {to}");
            return;
        };
        self.toggle(to, placed);

        // A promotion leaves the promoted piece on the board; the pawn
        // returns home.
        let mover = if mv.is_promotion() {
            Piece::new(us, PieceKind::Pawn)
        } else {
            placed
        };
        self.toggle(from, mover);

        if let Some((victim, victim_sq)) = delta.captured {
            self.toggle(victim_sq, victim);
        }
        if mv.is_castle()
            && let Some((rook_from, rook_to)) = castle_rook_squares(to)
        {
            let rook = Piece::new(us, PieceKind::Rook);
            self.toggle(rook_to, rook);
            self.toggle(rook_from, rook);
        }

        self.set_castling(delta.castling);
        self.set_en_passant(delta.en_passant);
        self.set_halfmove_clock(delta.halfmove_clock);
        self.set_legality(delta.legality);
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castling::CastleRights;
    use crate::color::Color;
    use crate::moves::{Move, Promotion};
    use crate::piece::Piece;
    use crate::square::Square;

    fn board(fen: &str) -> Board {
        fen.parse().expect("test FEN parses")
    }

    #[track_caller]
    fn assert_make_unmake_restores(fen: &str, mv: Move) {
        let mut board = board(fen);
        let snapshot = board.clone();
        board.make_move(mv);
        board.unmake_move(mv);
        assert!(board == snapshot, "make/unmake of {mv} did not restore {fen}");
    }

    #[test]
    fn pawn_push_sets_en_passant_target() {
        let mut board = Board::starting_position();
        board.make_move(Move::normal(Square::E2, Square::E4));
        assert_eq!(board.piece_on(Square::E4), Some(Piece::WhitePawn));
        assert_eq!(board.piece_on(Square::E2), None);
        assert_eq!(board.en_passant(), Some(Square::E3));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn single_push_clears_en_passant_target() {
        let mut board = Board::starting_position();
        board.make_move(Move::normal(Square::E2, Square::E3));
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn capture_removes_victim_and_resets_clock() {
        let mut board = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 7 20");
        board.make_move(Move::normal(Square::E4, Square::D5));
        assert_eq!(board.piece_on(Square::D5), Some(Piece::WhitePawn));
        assert_eq!(board.piece_on(Square::E4), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.side(Color::Black).popcount(), 1);
    }

    #[test]
    fn quiet_knight_move_advances_clock() {
        let mut board = Board::starting_position();
        board.make_move(Move::normal(Square::G1, Square::F3));
        assert_eq!(board.halfmove_clock(), 1);
    }

    #[test]
    fn fullmove_increments_after_black_only() {
        let mut board = Board::starting_position();
        board.make_move(Move::normal(Square::E2, Square::E4));
        assert_eq!(board.fullmove_number(), 1);
        board.make_move(Move::normal(Square::E7, Square::E5));
        assert_eq!(board.fullmove_number(), 2);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut board = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        board.make_move(Move::en_passant(Square::E5, Square::D6));
        assert_eq!(board.piece_on(Square::D6), Some(Piece::WhitePawn));
        assert_eq!(board.piece_on(Square::D5), None);
        assert_eq!(board.piece_on(Square::E5), None);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        for promo in Promotion::ALL {
            let mut board = board("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1");
            board.make_move(Move::new_promotion(Square::E7, Square::E8, promo));
            assert_eq!(
                board.piece_on(Square::E8),
                Some(Piece::new(Color::White, promo.kind()))
            );
            assert_eq!(board.piece_on(Square::E7), None);
        }
    }

    #[test]
    fn kingside_castle_moves_both_pieces() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.make_move(Move::castle(Square::E1, Square::G1));
        assert_eq!(board.piece_on(Square::G1), Some(Piece::WhiteKing));
        assert_eq!(board.piece_on(Square::F1), Some(Piece::WhiteRook));
        assert_eq!(board.piece_on(Square::E1), None);
        assert_eq!(board.piece_on(Square::H1), None);
        assert!(!board.castling().contains(CastleRights::WHITE_OO));
        assert!(!board.castling().contains(CastleRights::WHITE_OOO));
        assert!(board.castling().contains(CastleRights::BLACK_BOTH));
    }

    #[test]
    fn queenside_castle_moves_both_pieces() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        board.make_move(Move::castle(Square::E8, Square::C8));
        assert_eq!(board.piece_on(Square::C8), Some(Piece::BlackKing));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BlackRook));
        assert!(board.castling().contains(CastleRights::WHITE_BOTH));
        assert!(!board.castling().contains(CastleRights::BLACK_OO));
    }

    #[test]
    fn rook_move_drops_one_right() {
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.make_move(Move::normal(Square::A1, Square::A4));
        assert!(!board.castling().contains(CastleRights::WHITE_OOO));
        assert!(board.castling().contains(CastleRights::WHITE_OO));
    }

    #[test]
    fn capturing_a_corner_rook_drops_its_right() {
        // White rook takes the rook on h8; black loses kingside castling.
        let mut board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.make_move(Move::normal(Square::H1, Square::H8));
        assert!(!board.castling().contains(CastleRights::BLACK_OO));
        assert!(board.castling().contains(CastleRights::BLACK_OOO));
        // White's own kingside right is gone too: the rook left h1.
        assert!(!board.castling().contains(CastleRights::WHITE_OO));
    }

    #[test]
    fn unmake_restores_quiet_move() {
        assert_make_unmake_restores(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Move::normal(Square::G1, Square::F3),
        );
    }

    #[test]
    fn unmake_restores_double_push() {
        assert_make_unmake_restores(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Move::normal(Square::D2, Square::D4),
        );
    }

    #[test]
    fn unmake_restores_capture() {
        assert_make_unmake_restores(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            Move::normal(Square::E4, Square::D5),
        );
    }

    #[test]
    fn unmake_restores_en_passant() {
        assert_make_unmake_restores(
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
            Move::en_passant(Square::E5, Square::D6),
        );
    }

    #[test]
    fn unmake_restores_castling_both_sides() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_make_unmake_restores(fen, Move::castle(Square::E1, Square::G1));
        assert_make_unmake_restores(fen, Move::castle(Square::E1, Square::C1));
    }

    #[test]
    fn unmake_restores_promotion_capture() {
        assert_make_unmake_restores(
            "3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1",
            Move::new_promotion(Square::E7, Square::D8, Promotion::Queen),
        );
    }

    #[test]
    fn unmake_restores_black_move_and_fullmove() {
        assert_make_unmake_restores(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            Move::normal(Square::G8, Square::F6),
        );
    }

    #[test]
    fn nested_make_unmake_restores_in_order() {
        let mut board = Board::starting_position();
        let snapshot = board.clone();
        let first = Move::normal(Square::E2, Square::E4);
        let second = Move::normal(Square::E7, Square::E5);
        let third = Move::normal(Square::G1, Square::F3);
        board.make_move(first);
        board.make_move(second);
        board.make_move(third);
        assert_eq!(board.undo_depth(), 3);
        board.unmake_move(third);
        board.unmake_move(second);
        board.unmake_move(first);
        assert_eq!(board.undo_depth(), 0);
        assert!(board == snapshot);
    }
}
