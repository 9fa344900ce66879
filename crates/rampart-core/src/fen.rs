//! Forsyth-Edwards Notation parsing and serialization.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::{Board, BoardError};
use crate::castling::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::{File, Rank, Square};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Not exactly six space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields present.
        found: usize,
    },
    /// The placement field does not describe exactly eight ranks.
    #[error("expected 8 ranks in the placement field, found {found}")]
    WrongRankCount {
        /// Number of ranks present.
        found: usize,
    },
    /// A rank string describes more or fewer than eight squares.
    #[error("rank {rank} describes {described} squares")]
    BadRankWidth {
        /// Rank digit as written on the board (8 down to 1).
        rank: char,
        /// Squares the rank string accounts for.
        described: usize,
    },
    /// A character in the placement field is neither a digit 1-8 nor a
    /// piece letter.
    #[error("invalid placement character {character:?}")]
    BadPlacementChar {
        /// The offending character.
        character: char,
    },
    /// The active-color field is not `w` or `b`.
    #[error("invalid active color {found:?}")]
    BadActiveColor {
        /// The offending field.
        found: String,
    },
    /// The castling field contains a letter outside `KQkq`.
    #[error("invalid castling character {character:?}")]
    InvalidCastlingChar {
        /// The offending character.
        character: char,
    },
    /// The en-passant field is neither `-` nor a square name.
    #[error("invalid en passant square {found:?}")]
    BadEnPassant {
        /// The offending field.
        found: String,
    },
    /// The halfmove clock or fullmove number is not a non-negative integer.
    #[error("invalid {counter} {found:?}")]
    BadCounter {
        /// Which counter failed: "halfmove clock" or "fullmove number".
        counter: &'static str,
        /// The offending field.
        found: String,
    },
    /// The fields parsed but the resulting position is malformed.
    #[error("malformed position: {0}")]
    MalformedPosition(#[from] BoardError),
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut pieces = [Bitboard::EMPTY; Piece::COUNT];
        // FEN lists rank 8 first.
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::new(7 - row as u8).expect("row is 0..8");
            let mut file_index = 0u8;
            for c in rank_str.chars() {
                match c.to_digit(10) {
                    Some(run) if (1..=8).contains(&run) => file_index += run as u8,
                    Some(_) => return Err(FenError::BadPlacementChar { character: c }),
                    None => {
                        let piece = Piece::from_fen_char(c)
                            .ok_or(FenError::BadPlacementChar { character: c })?;
                        let file = File::new(file_index).ok_or(FenError::BadRankWidth {
                            rank: rank.digit(),
                            described: file_index as usize + 1,
                        })?;
                        pieces[piece.index()] =
                            pieces[piece.index()].with(Square::new(file, rank));
                        file_index += 1;
                    }
                }
            }
            if file_index != 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank.digit(),
                    described: file_index as usize,
                });
            }
        }

        let side_to_move = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::BadActiveColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastleRights::from_fen(castling)?;

        let en_passant = match en_passant {
            "-" => None,
            name => Some(name.parse::<Square>().map_err(|()| FenError::BadEnPassant {
                found: name.to_string(),
            })?),
        };

        let halfmove_clock = halfmove.parse::<u16>().map_err(|_| FenError::BadCounter {
            counter: "halfmove clock",
            found: halfmove.to_string(),
        })?;
        let fullmove_number = fullmove.parse::<u16>().map_err(|_| FenError::BadCounter {
            counter: "fullmove number",
            found: fullmove.to_string(),
        })?;

        let mut board = Board::from_parts(
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        // Validate before the first legality pass: the analyzer assumes
        // both kings exist.
        board.validate()?;
        board.refresh_legality();
        Ok(board)
    }
}

/// Serializes the position as a six-field FEN string.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0u8..8).rev() {
            let mut empty_run = 0;
            for file in 0u8..8 {
                let sq = Square::from_index(row * 8 + file).expect("index in range");
                match self.piece_on(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
