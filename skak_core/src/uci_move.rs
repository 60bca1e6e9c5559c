use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Square;
use crate::mv::Move;
use crate::piece::PieceType;

/// A move in long algebraic notation: `e2e4`, `e7e8q`. Castling is encoded
/// as the king's two-square move (`e1g1`, `e1c1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongAlgebraicMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Display for LongAlgebraicMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseLongAlgebraicMoveError {
    #[error("long algebraic move {0:?} has the wrong length")]
    WrongLength(&'static str),
    #[error("invalid square in long algebraic move")]
    InvalidSquare,
    #[error("invalid promotion piece {0:?}")]
    InvalidPromotion(char),
}

impl FromStr for LongAlgebraicMove {
    type Err = ParseLongAlgebraicMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseLongAlgebraicMoveError::WrongLength("expected 4 or 5 characters"));
        }

        let from: Square = s[0..2].parse().map_err(|_| ParseLongAlgebraicMoveError::InvalidSquare)?;
        let to: Square = s[2..4].parse().map_err(|_| ParseLongAlgebraicMoveError::InvalidSquare)?;

        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(PieceType::Queen),
            Some(b'r') => Some(PieceType::Rook),
            Some(b'b') => Some(PieceType::Bishop),
            Some(b'n') => Some(PieceType::Knight),
            Some(&c) => return Err(ParseLongAlgebraicMoveError::InvalidPromotion(c as char)),
        };

        Ok(Self { from, to, promotion })
    }
}

impl From<Move> for LongAlgebraicMove {
    fn from(m: Move) -> Self {
        Self {
            from: m.from_square(),
            to: m.to_square(),
            promotion: m.promotion(),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_plain_move() {
        let m: LongAlgebraicMove = "e2e4".parse().unwrap();
        assert_eq!(m, LongAlgebraicMove { from: Square::E2, to: Square::E4, promotion: None });
    }

    #[test]
    fn parses_promotion() {
        let m: LongAlgebraicMove = "e7e8q".parse().unwrap();
        assert_eq!(m.promotion, Some(PieceType::Queen));
    }

    #[test]
    fn display_round_trips() {
        let m = LongAlgebraicMove { from: Square::A7, to: Square::A8, promotion: Some(PieceType::Knight) };
        assert_eq!(m.to_string(), "a7a8n");
        assert_eq!(m.to_string().parse::<LongAlgebraicMove>().unwrap(), m);
    }

    #[test]
    fn rejects_bad_length() {
        assert!("e2e".parse::<LongAlgebraicMove>().is_err());
    }
}
