use std::fmt::Display;
use std::num::NonZeroU8;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive as _;
use thiserror::Error;

use crate::geometry::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceType {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    pub const PROMOTION_TARGETS: [PieceType; 4] =
        [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    /// The set of ray/leap directions this piece type can move along, for
    /// non-pawn pieces. Pawns use [`Piece::pawn_push_direction`] instead,
    /// since their directions depend on color.
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            PieceType::Pawn => &[],
            PieceType::Knight => &Direction::KNIGHT_LEAPS,
            PieceType::Bishop => &Direction::DIAGONAL,
            PieceType::Rook => &Direction::ORTHOGONAL,
            PieceType::Queen | PieceType::King => &Direction::RAYS,
        }
    }

    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub const fn as_lowercase_char(self) -> char {
        self.as_uppercase_char().to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 8,
}

impl Color {
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The direction a pawn of this color advances.
    pub const fn pawn_push_direction(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }

    /// The two directions a pawn of this color captures along.
    pub const fn pawn_capture_directions(self) -> [Direction; 2] {
        match self {
            Color::White => [Direction::NorthEast, Direction::NorthWest],
            Color::Black => [Direction::SouthEast, Direction::SouthWest],
        }
    }

    pub const fn starting_pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

/// A colored piece, packed as `color | piece_type` into a single non-zero
/// byte (color occupies bit 3, piece type the low 3 bits).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(NonZeroU8);

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.as_fen_char())
    }
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        let packed = color as u8 | piece_type as u8;
        match NonZeroU8::new(packed) {
            Some(n) => Self(n),
            None => panic!("packed piece value is never zero"),
        }
    }

    pub const fn white(piece_type: PieceType) -> Self {
        Self::new(Color::White, piece_type)
    }

    pub const fn black(piece_type: PieceType) -> Self {
        Self::new(Color::Black, piece_type)
    }

    pub fn try_from_u8(value: u8) -> Option<Self> {
        let n = NonZeroU8::new(value)?;
        let color = if value & 0x8 != 0 { Color::Black } else { Color::White };
        PieceType::from_u8(value & 0x7)?;
        Some(Self(n))
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    pub const fn color(self) -> Color {
        if self.0.get() & 0x8 != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn piece_type(self) -> PieceType {
        PieceType::from_u8(self.0.get() & 0x7).expect("packed piece always has a valid type")
    }

    /// Ordinal in `0..12`, used to index per-(color,type) collections.
    pub fn ordinal(self) -> usize {
        self.color().index() * 6 + (self.piece_type().index() - 1)
    }

    pub fn directions(self) -> &'static [Direction] {
        self.piece_type().directions()
    }

    pub const fn as_fen_char(self) -> char {
        let upper = match PieceType::from_u8_const(self.0.get() & 0x7) {
            Some(pt) => pt.as_uppercase_char(),
            None => unreachable!(),
        };
        if self.color().is_white() {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }

    pub fn try_from_fen_char(c: char) -> Option<Self> {
        let piece_type = match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'Q' => PieceType::Queen,
            'K' => PieceType::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self::new(color, piece_type))
    }

    pub const fn as_unicode_char(self) -> char {
        match (self.color(), PieceType::from_u8_const(self.0.get() & 0x7)) {
            (Color::White, Some(PieceType::Pawn)) => '\u{2659}',
            (Color::White, Some(PieceType::Knight)) => '\u{2658}',
            (Color::White, Some(PieceType::Bishop)) => '\u{2657}',
            (Color::White, Some(PieceType::Rook)) => '\u{2656}',
            (Color::White, Some(PieceType::Queen)) => '\u{2655}',
            (Color::White, Some(PieceType::King)) => '\u{2654}',
            (Color::Black, Some(PieceType::Pawn)) => '\u{265F}',
            (Color::Black, Some(PieceType::Knight)) => '\u{265E}',
            (Color::Black, Some(PieceType::Bishop)) => '\u{265D}',
            (Color::Black, Some(PieceType::Rook)) => '\u{265C}',
            (Color::Black, Some(PieceType::Queen)) => '\u{265B}',
            (Color::Black, Some(PieceType::King)) => '\u{265A}',
            (_, None) => unreachable!(),
        }
    }
}

// `num_derive::FromPrimitive` doesn't provide a `const fn`, so we need a
// small hand-written helper to keep `as_fen_char`/`as_unicode_char` const.
impl PieceType {
    const fn from_u8_const(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::Bishop),
            4 => Some(PieceType::Rook),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_fen_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid piece character {0:?}")]
pub struct ParsePieceError(char);

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(ParsePieceError('\0'))?;
        if chars.next().is_some() {
            return Err(ParsePieceError(c));
        }
        Self::try_from_fen_char(c).ok_or(ParsePieceError(c))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn piece_round_trips_fen_char() {
        for color in [Color::White, Color::Black] {
            for piece_type in PieceType::ALL {
                let piece = Piece::new(color, piece_type);
                let c = piece.as_fen_char();
                assert_eq!(Piece::try_from_fen_char(c), Some(piece));
            }
        }
    }

    #[test]
    fn color_and_type_extraction() {
        let piece = Piece::black(PieceType::Knight);
        assert_eq!(piece.color(), Color::Black);
        assert_eq!(piece.piece_type(), PieceType::Knight);
    }

    #[test]
    fn ordinal_is_unique_per_piece() {
        let mut ordinals: Vec<usize> = Vec::new();
        for color in [Color::White, Color::Black] {
            for piece_type in PieceType::ALL {
                ordinals.push(Piece::new(color, piece_type).ordinal());
            }
        }
        ordinals.sort();
        ordinals.dedup();
        assert_eq!(ordinals.len(), 12);
    }

    #[test]
    fn fen_char_case_follows_color() {
        assert_eq!(Piece::white(PieceType::Queen).as_fen_char(), 'Q');
        assert_eq!(Piece::black(PieceType::Queen).as_fen_char(), 'q');
    }
}
