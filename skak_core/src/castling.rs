use bitflags::bitflags;

use crate::geometry::{Direction, Square};
use crate::piece::Color;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KINGSIDE = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
        const KINGSIDE = Self::WHITE_KINGSIDE.bits() | Self::BLACK_KINGSIDE.bits();
        const QUEENSIDE = Self::WHITE_QUEENSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastlingRights {
    pub fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE,
            Color::Black => Self::BLACK,
        }
    }

    pub fn as_fen_str(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        if self.contains(Self::WHITE_KINGSIDE) {
            s.push('K');
        }
        if self.contains(Self::WHITE_QUEENSIDE) {
            s.push('Q');
        }
        if self.contains(Self::BLACK_KINGSIDE) {
            s.push('k');
        }
        if self.contains(Self::BLACK_QUEENSIDE) {
            s.push('q');
        }
        s
    }

    pub fn from_fen_str(s: &str) -> Self {
        let mut rights = Self::empty();
        for c in s.chars() {
            match c {
                'K' => rights |= Self::WHITE_KINGSIDE,
                'Q' => rights |= Self::WHITE_QUEENSIDE,
                'k' => rights |= Self::BLACK_KINGSIDE,
                'q' => rights |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        rights
    }
}

/// One of the four individual castling rights, with the fixed squares and
/// king-travel direction it involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleInfo {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// The direction the king travels (and the direction used to find
    /// squares that must be unattacked along the king's path).
    pub direction: Direction,
}

impl CastleSide {
    pub const ALL: [CastleSide; 4] = [
        CastleSide::WhiteKingside,
        CastleSide::WhiteQueenside,
        CastleSide::BlackKingside,
        CastleSide::BlackQueenside,
    ];

    pub const fn info(self) -> CastleInfo {
        match self {
            CastleSide::WhiteKingside => CastleInfo {
                right: CastlingRights::WHITE_KINGSIDE,
                color: Color::White,
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
                direction: Direction::East,
            },
            CastleSide::WhiteQueenside => CastleInfo {
                right: CastlingRights::WHITE_QUEENSIDE,
                color: Color::White,
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
                direction: Direction::West,
            },
            CastleSide::BlackKingside => CastleInfo {
                right: CastlingRights::BLACK_KINGSIDE,
                color: Color::Black,
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
                direction: Direction::East,
            },
            CastleSide::BlackQueenside => CastleInfo {
                right: CastlingRights::BLACK_QUEENSIDE,
                color: Color::Black,
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
                direction: Direction::West,
            },
        }
    }

    pub fn for_color(color: Color) -> [CastleInfo; 2] {
        match color {
            Color::White => [CastleSide::WhiteKingside.info(), CastleSide::WhiteQueenside.info()],
            Color::Black => [CastleSide::BlackKingside.info(), CastleSide::BlackQueenside.info()],
        }
    }
}
