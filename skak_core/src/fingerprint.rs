use std::fmt::Debug;
use std::ops::{BitXor, BitXorAssign};
use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};

use crate::castling::CastlingRights;
use crate::geometry::Square;
use crate::piece::{Color, Piece};

/// The subset of position state relevant to threefold repetition:
/// placement, side to move, castling rights, en-passant target. Clocks and
/// move numbers never participate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn piece(piece: Piece, square: Square) -> Self {
        let table = FingerprintTable::instance();
        Self(table.pieces[piece.ordinal() * 64 + square.index()])
    }

    pub fn side_to_move(color: Color) -> Self {
        match color {
            Color::White => Self(0),
            Color::Black => Self(FingerprintTable::instance().side_to_move),
        }
    }

    pub fn castling(rights: CastlingRights) -> Self {
        Self(FingerprintTable::instance().castling[rights.bits() as usize])
    }

    pub fn en_passant(square: Option<Square>) -> Self {
        match square {
            Some(square) => Self(FingerprintTable::instance().en_passant[square.file() as usize]),
            None => Self(0),
        }
    }

    pub fn toggle_piece(&mut self, piece: Piece, square: Square) {
        *self ^= Self::piece(piece, square);
    }
}

impl BitXor for Fingerprint {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Fingerprint {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({:#016x})", self.0)
    }
}

struct FingerprintTable {
    pieces: [u64; 12 * 64],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant: [u64; 8],
}

impl FingerprintTable {
    fn build() -> Self {
        let mut rng = rand_chacha::ChaCha12Rng::from_seed([
            0x6b, 0x61, 0x73, 0x2d, 0x66, 0x69, 0x6e, 0x67, 0x65, 0x72, 0x70, 0x72, 0x69, 0x6e,
            0x74, 0x2d, 0x73, 0x65, 0x65, 0x64, 0x2d, 0x30, 0x31, 0x02, 0x03, 0x04, 0x05, 0x06,
            0x07, 0x08, 0x09, 0x0a,
        ]);

        let mut pieces = [0; 12 * 64];
        pieces.fill_with(|| rng.next_u64());

        let side_to_move = rng.next_u64();

        let mut castling = [0; 16];
        castling.fill_with(|| rng.next_u64());

        let mut en_passant = [0; 8];
        en_passant.fill_with(|| rng.next_u64());

        Self {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    fn instance() -> &'static Self {
        static INSTANCE: OnceLock<FingerprintTable> = OnceLock::new();
        INSTANCE.get_or_init(Self::build)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::PieceType;

    #[test]
    fn toggling_twice_is_identity() {
        let mut fp = Fingerprint::default();
        let original = fp;
        fp.toggle_piece(Piece::white(PieceType::Knight), Square::B1);
        assert_ne!(fp, original);
        fp.toggle_piece(Piece::white(PieceType::Knight), Square::B1);
        assert_eq!(fp, original);
    }

    #[test]
    fn side_to_move_differs() {
        assert_ne!(Fingerprint::side_to_move(Color::White), Fingerprint::side_to_move(Color::Black));
    }

    #[test]
    fn distinct_squares_give_distinct_fingerprints() {
        let a = Fingerprint::piece(Piece::white(PieceType::Pawn), Square::E2);
        let b = Fingerprint::piece(Piece::white(PieceType::Pawn), Square::E4);
        assert_ne!(a, b);
    }
}
