//! Castling availability as a four-bit mask.

use std::fmt;

use crate::fen::FenError;

/// Castling rights. Bit 0 = white kingside, 1 = white queenside,
/// 2 = black kingside, 3 = black queenside.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_OO: CastleRights = CastleRights(0b0001);
    pub const WHITE_OOO: CastleRights = CastleRights(0b0010);
    pub const BLACK_OO: CastleRights = CastleRights(0b0100);
    pub const BLACK_OOO: CastleRights = CastleRights(0b1000);

    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every right in `other` is present.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Rights with those in `other` added.
    #[inline]
    pub const fn grant(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Rights with those in `other` removed.
    #[inline]
    pub const fn revoke(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Parse the FEN castling field (`"KQkq"` subsets or `"-"`).
    pub fn from_fen(field: &str) -> Result<CastleRights, FenError> {
        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        let mut rights = CastleRights::NONE;
        for c in field.chars() {
            let flag = match c {
                'K' => CastleRights::WHITE_OO,
                'Q' => CastleRights::WHITE_OOO,
                'k' => CastleRights::BLACK_OO,
                'q' => CastleRights::BLACK_OOO,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.grant(flag);
        }
        Ok(rights)
    }
}

/// Prints the FEN castling field.
impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (flag, c) in [
            (CastleRights::WHITE_OO, 'K'),
            (CastleRights::WHITE_OOO, 'Q'),
            (CastleRights::BLACK_OO, 'k'),
            (CastleRights::BLACK_OOO, 'q'),
        ] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
