//! Squares, files, and ranks in little-endian rank-file order.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;

/// A file (column) of the board, 0 = a-file through 7 = h-file.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct File(u8);

impl File {
    pub const COUNT: usize = 8;

    /// Build a file from its index, rejecting anything past the h-file.
    #[inline]
    pub const fn new(index: u8) -> Option<File> {
        if index < 8 { Some(File(index)) } else { None }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Lowercase file letter, `'a'` through `'h'`.
    #[inline]
    pub const fn letter(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File({})", self.letter())
    }
}

/// A rank (row) of the board, 0 = white's first rank through 7.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const COUNT: usize = 8;

    /// Build a rank from its index, rejecting anything past the eighth rank.
    #[inline]
    pub const fn new(index: u8) -> Option<Rank> {
        if index < 8 { Some(Rank(index)) } else { None }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank digit as printed in algebraic notation, `'1'` through `'8'`.
    #[inline]
    pub const fn digit(self) -> char {
        (b'1' + self.0) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rank({})", self.digit())
    }
}

/// A board square. Index = rank * 8 + file, so a1 = 0 and h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Build a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(rank.0 * 8 + file.0)
    }

    /// Build a square from a 0..64 index.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Build a square from an index already known to be in range.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> File {
        File(self.0 % 8)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank(self.0 / 8)
    }

    /// Single-square bitboard.
    #[inline]
    pub const fn bb(self) -> Bitboard {
        Bitboard::new(1 << self.0)
    }

    /// The square `delta` index steps away, if it stays on the board.
    ///
    /// This is an index offset, not a geometric one: callers that step by
    /// ±1 or ±7/±9 must guard against file wraparound themselves.
    #[inline]
    pub const fn shifted(self, delta: i8) -> Option<Square> {
        let target = self.0 as i8 + delta;
        if 0 <= target && target < 64 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

/// Parses algebraic notation, e.g. `"e4"`.
impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Square, ()> {
        let &[file_byte, rank_byte] = s.as_bytes() else {
            return Err(());
        };
        if !file_byte.is_ascii_lowercase() {
            return Err(());
        }
        let file = File::new(file_byte.wrapping_sub(b'a')).ok_or(())?;
        let rank = Rank::new(rank_byte.wrapping_sub(b'1')).ok_or(())?;
        Ok(Square::new(file, rank))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

macro_rules! named_squares {
    ($($name:ident = $index:expr),+ $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    };
}

named_squares! {
    A1 = 0,  B1 = 1,  C1 = 2,  D1 = 3,  E1 = 4,  F1 = 5,  G1 = 6,  H1 = 7,
    A2 = 8,  B2 = 9,  C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}
