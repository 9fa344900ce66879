//! Mobility: a small bonus for having options.
//!
//! Half a centipawn per legal move, credited to the side to move. Too small
//! to outweigh material, but enough to break ties toward freer positions.

use rampart_core::Color;

/// Mobility bonus in centipawns from White's perspective.
#[inline]
pub fn mobility(side_to_move: Color, legal_moves: usize) -> i32 {
    let bonus = legal_moves as i32 / 2;
    match side_to_move {
        Color::White => bonus,
        Color::Black => -bonus,
    }
}

#[cfg(test)]
mod tests {
    use rampart_core::Color;

    use super::mobility;

    #[test]
    fn signed_by_side_to_move() {
        assert_eq!(mobility(Color::White, 20), 10);
        assert_eq!(mobility(Color::Black, 20), -10);
    }

    #[test]
    fn rounds_down() {
        assert_eq!(mobility(Color::White, 21), 10);
        assert_eq!(mobility(Color::White, 1), 0);
        assert_eq!(mobility(Color::White, 0), 0);
    }
}
