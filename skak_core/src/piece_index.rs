use arrayvec::ArrayVec;

use crate::geometry::{Direction, Square};
use crate::piece::{Color, Piece, PieceType};

/// Generous upper bound on how many of one (color, piece type) combination
/// can exist at once (8 pawns, or up to 8 promoted pawns joining the
/// original piece).
const MAX_PER_GROUP: usize = 10;

/// A 64-entry mailbox plus twelve per-(color,type) square sets and a cached
/// king square per color.
///
/// Invariant: every occupied mailbox entry appears in exactly one group, and
/// each king group has at most one member (exactly one in a legal,
/// non-setup position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceIndex {
    board: [Option<Piece>; 64],
    groups: [ArrayVec<Square, MAX_PER_GROUP>; 12],
    white_king: Option<Square>,
    black_king: Option<Square>,
}

impl Default for PieceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceIndex {
    pub fn new() -> Self {
        Self {
            board: [None; 64],
            groups: Default::default(),
            white_king: None,
            black_king: None,
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Places `piece` on `square`, first removing whatever was there.
    pub fn set(&mut self, piece: Piece, square: Square) {
        self.remove(square);

        self.board[square.index()] = Some(piece);
        self.groups[piece.ordinal()].push(square);

        if piece.piece_type() == PieceType::King {
            match piece.color() {
                Color::White => self.white_king = Some(square),
                Color::Black => self.black_king = Some(square),
            }
        }
    }

    /// Clears `square`, returning whatever piece was there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let old = self.board[square.index()].take()?;

        let group = &mut self.groups[old.ordinal()];
        if let Some(pos) = group.iter().position(|&sq| sq == square) {
            group.swap_remove(pos);
        }

        if old.piece_type() == PieceType::King {
            match old.color() {
                Color::White => self.white_king = None,
                Color::Black => self.black_king = None,
            }
        }

        Some(old)
    }

    pub fn group(&self, piece: Piece) -> &[Square] {
        &self.groups[piece.ordinal()]
    }

    pub fn group_size(&self, piece: Piece) -> usize {
        self.groups[piece.ordinal()].len()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// True if every square strictly between `from` and `to` (in the
    /// direction `dir`) is unoccupied.
    pub fn ray_empty(&self, dir: Direction, from: Square, to: Square) -> bool {
        self.ray_empty_impl(dir, from, to, None)
    }

    /// As [`Self::ray_empty`], but treats `king_color`'s king square as
    /// empty — used to check whether a slider's vision continues past the
    /// square the king currently occupies.
    pub fn ray_empty_ignoring_king(
        &self,
        dir: Direction,
        from: Square,
        to: Square,
        king_color: Color,
    ) -> bool {
        self.ray_empty_impl(dir, from, to, self.king_square(king_color))
    }

    fn ray_empty_impl(&self, dir: Direction, from: Square, to: Square, ignore: Option<Square>) -> bool {
        let mut cursor = from;
        loop {
            let Some(next) = dir.step(cursor) else {
                return true;
            };
            if next == to {
                return true;
            }
            if Some(next) != ignore && self.get(next).is_some() {
                return false;
            }
            cursor = next;
        }
    }

    pub fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| (Square::from_index(i as u8), piece)))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_then_get() {
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::Queen), Square::D1);
        assert_eq!(index.get(Square::D1), Some(Piece::white(PieceType::Queen)));
    }

    #[test]
    fn set_overwrites_previous_occupant() {
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::Pawn), Square::E4);
        index.set(Piece::black(PieceType::Knight), Square::E4);
        assert_eq!(index.get(Square::E4), Some(Piece::black(PieceType::Knight)));
        assert_eq!(index.group_size(Piece::white(PieceType::Pawn)), 0);
    }

    #[test]
    fn remove_clears_group_membership() {
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::Rook), Square::A1);
        index.remove(Square::A1);
        assert_eq!(index.get(Square::A1), None);
        assert_eq!(index.group_size(Piece::white(PieceType::Rook)), 0);
    }

    #[test]
    fn king_cache_tracks_placement_and_removal() {
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::King), Square::E1);
        assert_eq!(index.king_square(Color::White), Some(Square::E1));
        index.remove(Square::E1);
        assert_eq!(index.king_square(Color::White), None);
    }

    #[test]
    fn ray_empty_detects_blocker() {
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::Rook), Square::A1);
        index.set(Piece::black(PieceType::King), Square::A8);
        assert!(index.ray_empty(Direction::North, Square::A1, Square::A8));

        index.set(Piece::white(PieceType::Pawn), Square::A4);
        assert!(!index.ray_empty(Direction::North, Square::A1, Square::A8));
    }

    #[test]
    fn ray_empty_ignoring_king_skips_the_kings_own_square() {
        // White king on e4, about to retreat to e1, with a black rook
        // pinning the whole file from e8. Without ignoring the king's own
        // square, it looks like the king itself blocks the rook's vision.
        let mut index = PieceIndex::new();
        index.set(Piece::white(PieceType::King), Square::E4);
        index.set(Piece::black(PieceType::Rook), Square::E8);

        assert!(!index.ray_empty(Direction::South, Square::E8, Square::E1));
        assert!(index.ray_empty_ignoring_king(Direction::South, Square::E8, Square::E1, Color::White));
    }
}
