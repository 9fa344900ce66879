//! The position: piece placement, game state, and derived legality data.

use std::fmt;

use crate::analysis::{analyze, Legality};
use crate::bitboard::Bitboard;
use crate::castling::CastleRights;
use crate::color::Color;
use crate::fen::STARTING_FEN;
use crate::make_move::StateDelta;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Structural problems that make a position unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected exactly 1 {color:?} king, found {count}")]
    BadKingCount {
        /// The offending side.
        color: Color,
        /// How many kings that side has.
        count: u32,
    },
    /// Two piece bitboards claim the same square.
    #[error("piece bitboards overlap")]
    OverlappingPieces,
    /// The cached occupancy disagrees with the piece bitboards.
    #[error("occupancy is inconsistent with the piece bitboards")]
    InconsistentOccupancy,
}

/// A complete chess position.
///
/// The twelve piece bitboards are the source of truth; the side bitboards
/// and occupancy are kept in sync as pieces are toggled. The legality cache
/// is recomputed after every parse and every make/unmake, and the undo stack
/// holds one [`StateDelta`] per made move so unmake restores the position
/// bit for bit.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// One bitboard per colored piece, indexed by [`Piece::index()`].
    pieces: [Bitboard; Piece::COUNT],
    /// Per-side unions of the piece bitboards.
    sides: [Bitboard; Color::COUNT],
    /// Union of both sides.
    occupied: Bitboard,
    side_to_move: Color,
    castling: CastleRights,
    /// Square jumped over by the last double pawn push, if any.
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Pins, checks, and opponent attacks for the side to move.
    legality: Legality,
    undo_stack: Vec<StateDelta>,
}

impl Board {
    /// The standard starting position.
    pub fn starting_position() -> Board {
        STARTING_FEN
            .parse()
            .expect("the standard starting FEN is well-formed")
    }

    /// Assemble a board from parsed FEN fields.
    ///
    /// The legality cache starts empty: the caller must [`validate`]
    /// (ensuring both kings exist) and then [`refresh_legality`] before the
    /// board is used.
    ///
    /// [`validate`]: Board::validate
    /// [`refresh_legality`]: Board::refresh_legality
    pub(crate) fn from_parts(
        pieces: [Bitboard; Piece::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Board {
        let mut sides = [Bitboard::EMPTY; Color::COUNT];
        for piece in Piece::ALL {
            sides[piece.color().index()] |= pieces[piece.index()];
        }
        Board {
            pieces,
            sides,
            occupied: sides[0] | sides[1],
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            legality: Legality::NONE,
            undo_stack: Vec::new(),
        }
    }

    /// The piece on `sq`, if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if !self.occupied.contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
    }

    /// Bitboard of one colored piece.
    #[inline]
    pub fn bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Bitboard of one side's pieces of one kind.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[Piece::new(color, kind).index()]
    }

    /// All pieces of one side.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// All empty squares.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied
    }

    /// The king square of `color`.
    ///
    /// # Panics
    ///
    /// Panics if that side has no king; [`Board::validate`] rules that out
    /// for any board that reaches callers.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, PieceKind::King)
            .lsb()
            .expect("each side keeps exactly one king")
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Pin, check, and attack data for the side to move.
    #[inline]
    pub fn legality(&self) -> &Legality {
        &self.legality
    }

    /// `true` if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.legality.in_check()
    }

    /// Flip a piece's presence on `sq`, keeping the aggregates in sync.
    #[inline]
    pub(crate) fn toggle(&mut self, sq: Square, piece: Piece) {
        let mask = sq.bb();
        self.pieces[piece.index()] ^= mask;
        self.sides[piece.color().index()] ^= mask;
        self.occupied ^= mask;
    }

    /// Recompute the legality cache for the side to move.
    pub(crate) fn refresh_legality(&mut self) {
        self.legality = analyze(self);
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    pub(crate) fn set_legality(&mut self, legality: Legality) {
        self.legality = legality;
    }

    pub(crate) fn push_delta(&mut self, delta: StateDelta) {
        self.undo_stack.push(delta);
    }

    pub(crate) fn pop_delta(&mut self) -> Option<StateDelta> {
        self.undo_stack.pop()
    }

    /// Depth of the undo stack, i.e. how many moves can be unmade.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Check the structural invariants of the position.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let kings = self.pieces_of(color, PieceKind::King).popcount();
            if kings != 1 {
                return Err(BoardError::BadKingCount {
                    color,
                    count: kings,
                });
            }
        }

        let mut union = Bitboard::EMPTY;
        let mut total = 0;
        for piece in Piece::ALL {
            union |= self.pieces[piece.index()];
            total += self.pieces[piece.index()].popcount();
        }
        if total != union.popcount() {
            return Err(BoardError::OverlappingPieces);
        }
        if union != self.occupied || self.sides[0] | self.sides[1] != self.occupied {
            return Err(BoardError::InconsistentOccupancy);
        }

        Ok(())
    }

    /// Wrap the board for grid-style display.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}

/// Renders the board as an 8x8 grid with rank and file labels.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                let c = self.0.piece_on(sq).map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    writeln!(f, "{c}")?;
                }
            }
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::color::Color;
    use crate::piece::{Piece, PieceKind};
    use crate::square::Square;

    #[test]
    fn starting_position_is_valid() {
        let board = Board::starting_position();
        board.validate().unwrap();
        assert_eq!(board.occupied().popcount(), 32);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.undo_depth(), 0);
    }

    #[test]
    fn piece_lookup() {
        let board = Board::starting_position();
        assert_eq!(board.piece_on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(board.piece_on(Square::A2), Some(Piece::WhitePawn));
        assert_eq!(board.piece_on(Square::H7), Some(Piece::BlackPawn));
        assert_eq!(board.piece_on(Square::E4), None);
    }

    #[test]
    fn king_squares() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn toggle_keeps_aggregates_in_sync() {
        let mut board = Board::starting_position();
        board.toggle(Square::E2, Piece::WhitePawn);
        board.toggle(Square::E4, Piece::WhitePawn);
        assert_eq!(board.piece_on(Square::E2), None);
        assert_eq!(board.piece_on(Square::E4), Some(Piece::WhitePawn));
        assert_eq!(board.occupied().popcount(), 32);
        assert!(board.side(Color::White).contains(Square::E4));
        board.toggle(Square::E4, Piece::WhitePawn);
        board.toggle(Square::E2, Piece::WhitePawn);
        board.validate().unwrap();
    }

    #[test]
    fn validate_rejects_missing_king() {
        let result = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>();
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_two_kings() {
        let result = "4k2k/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>();
        assert!(result.is_err());
    }

    #[test]
    fn validate_only_constrains_kings_and_occupancy() {
        // Unreachable piece placements are still structurally fine; only
        // the king count and bitboard consistency are enforced.
        let board = "4k3/8/8/8/8/8/8/P3K3 w - - 0 1".parse::<Board>().unwrap();
        board.validate().unwrap();
    }

    #[test]
    fn pretty_grid() {
        let board = Board::starting_position();
        let grid = board.pretty().to_string();
        assert!(grid.contains("r n b q k b n r"));
        assert!(grid.contains("R N B Q K B N R"));
        assert!(grid.ends_with("a b c d e f g h"));
    }

    #[test]
    fn side_bitboards_disjoint() {
        let board = Board::starting_position();
        assert!((board.side(Color::White) & board.side(Color::Black)).none());
        assert_eq!(
            board.side(Color::White) | board.side(Color::Black),
            board.occupied()
        );
    }
}
