use bitflags::bitflags;

use crate::geometry::Square;
use crate::piece::{Piece, PieceType};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        const DOUBLE_PAWN_PUSH = 0b001;
        const CASTLE = 0b010;
        const EN_PASSANT = 0b100;
    }
}

/// How a move notation needs to disambiguate among same-type, same-color
/// pieces moving to the same destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disambiguation {
    #[default]
    None,
    File,
    Rank,
    Both,
}

/// A single chess move.
///
/// `disambiguation`, `is_check` and `is_checkmate` are stamped onto the move
/// after it is applied to a board (they describe the *result*, not the
/// move's identity), so they are deliberately excluded from [`PartialEq`].
#[derive(Debug, Clone, Copy)]
pub struct Move {
    piece: Piece,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
    captured: Option<Piece>,
    flags: MoveFlags,
    disambiguation: Disambiguation,
    is_check: bool,
    is_checkmate: bool,
}

impl Move {
    pub fn new(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            promotion: None,
            captured: None,
            flags: MoveFlags::empty(),
            disambiguation: Disambiguation::None,
            is_check: false,
            is_checkmate: false,
        }
    }

    pub fn with_promotion(mut self, promotion: PieceType) -> Self {
        self.promotion = Some(promotion);
        self
    }

    pub fn with_capture(mut self, captured: Piece) -> Self {
        self.captured = Some(captured);
        self
    }

    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn from_square(&self) -> Square {
        self.from
    }

    pub fn to_square(&self) -> Square {
        self.to
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    pub fn set_disambiguation(&mut self, disambiguation: Disambiguation) {
        self.disambiguation = disambiguation;
    }

    pub fn set_check_state(&mut self, is_check: bool, is_checkmate: bool) {
        self.is_check = is_check;
        self.is_checkmate = is_checkmate;
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece
            && self.from == other.from
            && self.to == other.to
            && self.promotion == other.promotion
            && self.captured == other.captured
            && self.flags == other.flags
    }
}

impl Eq for Move {}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::Color;

    #[test]
    fn equality_ignores_annotation_fields() {
        let mut a = Move::new(Piece::new(Color::White, PieceType::Pawn), Square::E2, Square::E4)
            .with_flags(MoveFlags::DOUBLE_PAWN_PUSH);
        let b = a;
        a.set_disambiguation(Disambiguation::File);
        a.set_check_state(true, true);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_distinguishes_promotion() {
        let pawn = Piece::new(Color::White, PieceType::Pawn);
        let a = Move::new(pawn, Square::E7, Square::E8).with_promotion(PieceType::Queen);
        let b = Move::new(pawn, Square::E7, Square::E8).with_promotion(PieceType::Rook);
        assert_ne!(a, b);
    }
}
