//! Board representation, legal move generation, and game rules for rampart.

mod analysis;
mod attacks;
mod bitboard;
mod board;
mod castling;
mod color;
mod fen;
mod make_move;
mod movegen;
mod moves;
mod perft;
mod piece;
mod square;

pub use analysis::Legality;
pub use attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, pawn_capture_span,
    queen_attacks, rook_attacks, Direction,
};
pub use bitboard::Bitboard;
pub use board::{Board, BoardError, PrettyBoard};
pub use castling::CastleRights;
pub use color::Color;
pub use fen::{FenError, STARTING_FEN};
pub use movegen::{generate_legal_moves, MoveList};
pub use moves::{Move, MoveKind, Promotion};
pub use perft::{divide, perft};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
