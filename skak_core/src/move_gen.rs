use arrayvec::ArrayVec;

use crate::castling::{CastleSide, CastlingRights};
use crate::geometry::{closed_path, direction_between, open_path, ray, Direction, Square};
use crate::mv::{Disambiguation, Move, MoveFlags};
use crate::piece::{Color, Piece, PieceType};
use crate::piece_index::PieceIndex;

pub const MAX_MOVES: usize = 256;
pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KingState {
    pub in_check: bool,
    pub has_no_moves: bool,
}

/// A read-only view over the pieces relevant to move generation: the piece
/// index plus the parts of position state that affect legality (castling
/// rights, en-passant target) but not the clocks or move counters.
pub struct Position<'a> {
    pub pieces: &'a PieceIndex,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}

impl<'a> Position<'a> {
    pub fn new(pieces: &'a PieceIndex, castling_rights: CastlingRights, en_passant: Option<Square>) -> Self {
        Self { pieces, castling_rights, en_passant }
    }

    pub fn all_legal_moves(&self, side: Color) -> MoveVec {
        let mut out = MoveVec::new();
        self.generate_legal_moves(side, None, &mut out);
        out
    }

    pub fn legal_moves_from(&self, side: Color, from: Square) -> MoveVec {
        let mut out = MoveVec::new();
        self.generate_legal_moves(side, Some(from), &mut out);
        out
    }

    pub fn is_legal(&self, m: &Move) -> bool {
        self.legal_moves_from(m.piece().color(), m.from_square()).contains(m)
    }

    /// Check status of `color`'s king. If `last_move` is known, uses the
    /// fast incremental check detection; otherwise falls back to a full
    /// attacker scan. `has_no_moves` assumes `color` is the side whose turn
    /// it is in this position (its castling rights / en-passant target).
    pub fn king_state(&self, color: Color, last_move: Option<&Move>) -> KingState {
        let checkers = self.checkers(color, last_move);
        KingState {
            in_check: !checkers.is_empty(),
            has_no_moves: self.all_legal_moves(color).is_empty(),
        }
    }

    /// All squares holding a `by_color` piece that attacks `square`.
    pub fn all_attackers(&self, square: Square, by_color: Color) -> Vec<Square> {
        let mut result = Vec::new();
        for piece_type in PieceType::ALL {
            let piece = Piece::new(by_color, piece_type);
            for &sq in self.pieces.group(piece) {
                if self.square_attacks(sq, piece, square, None) {
                    result.push(sq);
                }
            }
        }
        result
    }

    fn is_attacked(&self, square: Square, by_color: Color, ignoring_king_of: Option<Color>) -> bool {
        for piece_type in PieceType::ALL {
            let piece = Piece::new(by_color, piece_type);
            for &sq in self.pieces.group(piece) {
                if self.square_attacks(sq, piece, square, ignoring_king_of) {
                    return true;
                }
            }
        }
        false
    }

    fn square_attacks(&self, from: Square, piece: Piece, target: Square, ignoring_king_of: Option<Color>) -> bool {
        match piece.piece_type() {
            PieceType::Pawn => piece
                .color()
                .pawn_capture_directions()
                .iter()
                .any(|d| d.step(from) == Some(target)),
            PieceType::Knight => Direction::KNIGHT_LEAPS.iter().any(|d| d.step(from) == Some(target)),
            PieceType::King => Direction::RAYS.iter().any(|d| d.step(from) == Some(target)),
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => match direction_between(from, target) {
                Some(dir) if piece.directions().contains(&dir) => match ignoring_king_of {
                    Some(king_color) => self.pieces.ray_empty_ignoring_king(dir, from, target, king_color),
                    None => self.pieces.ray_empty(dir, from, target),
                },
                _ => false,
            },
        }
    }

    fn first_occupied_along(&self, from: Square, dir: Direction) -> Option<Square> {
        ray(from, dir).find(|&sq| self.pieces.get(sq).is_some())
    }

    /// Attacker squares against `color`'s king, using the fast incremental
    /// path when `last_move` is available.
    fn checkers(&self, color: Color, last_move: Option<&Move>) -> Vec<Square> {
        let Some(king_sq) = self.pieces.king_square(color) else {
            return Vec::new();
        };
        let mover_color = color.flip();

        let Some(last_move) = last_move else {
            return self.all_attackers(king_sq, mover_color);
        };

        let mut result = Vec::new();

        let to = last_move.to_square();
        if let Some(piece) = self.pieces.get(to) {
            if piece.color() == mover_color && self.square_attacks(to, piece, king_sq, None) {
                result.push(to);
            }
        }

        if last_move.is_castle() {
            if let Some(rook_to) = castle_rook_destination(last_move) {
                if let Some(piece) = self.pieces.get(rook_to) {
                    if piece.color() == mover_color && self.square_attacks(rook_to, piece, king_sq, None) {
                        result.push(rook_to);
                    }
                }
            }
        }

        if let Some(dir) = direction_between(king_sq, last_move.from_square()) {
            if dir.is_ray() {
                if let Some(slider_sq) = self.first_occupied_along(king_sq, dir) {
                    if slider_sq != to {
                        if let Some(piece) = self.pieces.get(slider_sq) {
                            if piece.color() == mover_color
                                && piece.piece_type().is_slider()
                                && piece.directions().contains(&dir)
                            {
                                result.push(slider_sq);
                            }
                        }
                    }
                }
            }
        }

        result
    }

    /// The direction from the king through `sq`, if `sq` is pinned against
    /// its own king along that ray.
    fn pin_direction(&self, sq: Square, side: Color, king_sq: Square) -> Option<Direction> {
        let dir = direction_between(king_sq, sq)?;
        if !dir.is_ray() || !self.pieces.ray_empty(dir, king_sq, sq) {
            return None;
        }
        let beyond = self.first_occupied_along(sq, dir)?;
        let piece = self.pieces.get(beyond)?;
        (piece.color() == side.flip() && piece.piece_type().is_slider() && piece.directions().contains(&dir))
            .then_some(dir)
    }

    fn en_passant_legal(&self, side: Color, from: Square, captured_sq: Square) -> bool {
        let Some(king_sq) = self.pieces.king_square(side) else {
            return true;
        };
        let Some(dir) = direction_between(king_sq, from) else {
            return true;
        };
        if !dir.is_ray() {
            return true;
        }

        let mut cursor = king_sq;
        loop {
            let Some(next) = dir.step(cursor) else {
                return true;
            };
            if next == from || next == captured_sq {
                cursor = next;
                continue;
            }
            return match self.pieces.get(next) {
                None => {
                    cursor = next;
                    continue;
                }
                Some(p) => !(p.color() == side.flip() && p.piece_type().is_slider() && p.directions().contains(&dir)),
            };
        }
    }

    fn generate_legal_moves(&self, side: Color, only_from: Option<Square>, out: &mut MoveVec) {
        out.clear();
        let Some(king_sq) = self.pieces.king_square(side) else {
            return;
        };

        let checkers = self.all_attackers(king_sq, side.flip());

        if only_from.is_none() || only_from == Some(king_sq) {
            self.generate_king_moves(side, king_sq, out);
            if checkers.is_empty() {
                self.generate_castling_moves(side, king_sq, out);
            }
        }

        if checkers.len() < 2 {
            for piece_type in [PieceType::Pawn, PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
                let piece = Piece::new(side, piece_type);
                for &sq in self.pieces.group(piece) {
                    if let Some(from) = only_from {
                        if from != sq {
                            continue;
                        }
                    }

                    let mut buf = MoveVec::new();
                    match piece_type {
                        PieceType::Pawn => self.generate_pawn_moves(side, sq, &mut buf),
                        PieceType::Knight => self.generate_knight_moves(side, sq, &mut buf),
                        _ => self.generate_slider_moves(side, piece_type, sq, &mut buf),
                    }

                    let pin_dir = self.pin_direction(sq, side, king_sq);

                    for mv in buf {
                        if let Some(dir) = pin_dir {
                            let on_ray = direction_between(king_sq, mv.to_square())
                                .is_some_and(|d| d == dir || d == dir.opposite());
                            if !on_ray {
                                continue;
                            }
                        }
                        out.push(mv);
                    }
                }
            }
        }

        if !checkers.is_empty() {
            let checker_sq = checkers[0];
            let single_slider_checker = checkers.len() == 1
                && self.pieces.get(checker_sq).is_some_and(|p| p.piece_type().is_slider());
            let interpose: Vec<Square> = if single_slider_checker {
                open_path(king_sq, checker_sq).collect()
            } else {
                Vec::new()
            };

            out.retain(|mv| {
                if mv.piece().piece_type() == PieceType::King {
                    return true;
                }
                if checkers.len() >= 2 {
                    return false;
                }
                let captured_sq = en_passant_captured_square(mv).unwrap_or_else(|| mv.to_square());
                captured_sq == checker_sq || interpose.contains(&mv.to_square())
            });
        }
    }

    fn generate_king_moves(&self, side: Color, king_sq: Square, out: &mut MoveVec) {
        let king_piece = Piece::new(side, PieceType::King);
        for dir in Direction::RAYS {
            let Some(to) = dir.step(king_sq) else {
                continue;
            };
            let occupant = self.pieces.get(to);
            if occupant.is_some_and(|p| p.color() == side) {
                continue;
            }
            if self.is_attacked(to, side.flip(), Some(side)) {
                continue;
            }
            let mut mv = Move::new(king_piece, king_sq, to);
            if let Some(enemy) = occupant {
                mv = mv.with_capture(enemy);
            }
            out.push(mv);
        }
    }

    fn generate_castling_moves(&self, side: Color, king_sq: Square, out: &mut MoveVec) {
        if self.is_attacked(king_sq, side.flip(), None) {
            return;
        }

        for info in CastleSide::for_color(side) {
            if !self.castling_rights.contains(info.right) {
                continue;
            }
            if self.pieces.get(info.king_from) != Some(Piece::new(side, PieceType::King)) {
                continue;
            }
            if self.pieces.get(info.rook_from) != Some(Piece::new(side, PieceType::Rook)) {
                continue;
            }
            if !self.pieces.ray_empty(info.direction, info.king_from, info.rook_from) {
                continue;
            }
            if closed_path(info.king_from, info.king_to).any(|sq| self.is_attacked(sq, side.flip(), None)) {
                continue;
            }

            out.push(Move::new(Piece::new(side, PieceType::King), info.king_from, info.king_to).with_flags(MoveFlags::CASTLE));
        }
    }

    fn generate_pawn_moves(&self, side: Color, sq: Square, out: &mut MoveVec) {
        let piece = Piece::new(side, PieceType::Pawn);
        let push_dir = side.pawn_push_direction();
        let promo_rank = side.promotion_rank();

        if let Some(one) = push_dir.step(sq) {
            if self.pieces.get(one).is_none() {
                push_pawn_move(piece, sq, one, None, promo_rank, out);
                if sq.rank() == side.starting_pawn_rank() {
                    if let Some(two) = push_dir.step(one) {
                        if self.pieces.get(two).is_none() {
                            out.push(Move::new(piece, sq, two).with_flags(MoveFlags::DOUBLE_PAWN_PUSH));
                        }
                    }
                }
            }
        }

        for dir in side.pawn_capture_directions() {
            let Some(to) = dir.step(sq) else {
                continue;
            };

            if let Some(target) = self.pieces.get(to) {
                if target.color() != side {
                    push_pawn_move(piece, sq, to, Some(target), promo_rank, out);
                }
            } else if Some(to) == self.en_passant {
                let captured_sq = Square::new(sq.rank() as i8, to.file() as i8).expect("same rank as mover");
                if self.pieces.get(captured_sq).is_some() && self.en_passant_legal(side, sq, captured_sq) {
                    let captured = self.pieces.get(captured_sq).expect("checked above");
                    out.push(Move::new(piece, sq, to).with_capture(captured).with_flags(MoveFlags::EN_PASSANT));
                }
            }
        }
    }

    fn generate_knight_moves(&self, side: Color, sq: Square, out: &mut MoveVec) {
        let piece = Piece::new(side, PieceType::Knight);
        for dir in Direction::KNIGHT_LEAPS {
            let Some(to) = dir.step(sq) else {
                continue;
            };
            match self.pieces.get(to) {
                Some(p) if p.color() == side => {}
                Some(enemy) => out.push(Move::new(piece, sq, to).with_capture(enemy)),
                None => out.push(Move::new(piece, sq, to)),
            }
        }
    }

    fn generate_slider_moves(&self, side: Color, piece_type: PieceType, sq: Square, out: &mut MoveVec) {
        let piece = Piece::new(side, piece_type);
        for &dir in piece_type.directions() {
            for to in ray(sq, dir) {
                match self.pieces.get(to) {
                    None => out.push(Move::new(piece, sq, to)),
                    Some(p) if p.color() != side => {
                        out.push(Move::new(piece, sq, to).with_capture(p));
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }
}

fn push_pawn_move(piece: Piece, from: Square, to: Square, captured: Option<Piece>, promo_rank: u8, out: &mut MoveVec) {
    if to.rank() == promo_rank {
        for promo in PieceType::PROMOTION_TARGETS {
            let mut mv = Move::new(piece, from, to).with_promotion(promo);
            if let Some(c) = captured {
                mv = mv.with_capture(c);
            }
            out.push(mv);
        }
    } else {
        let mut mv = Move::new(piece, from, to);
        if let Some(c) = captured {
            mv = mv.with_capture(c);
        }
        out.push(mv);
    }
}

fn en_passant_captured_square(mv: &Move) -> Option<Square> {
    if !mv.is_en_passant() {
        return None;
    }
    Square::new(mv.from_square().rank() as i8, mv.to_square().file() as i8)
}

fn castle_rook_destination(mv: &Move) -> Option<Square> {
    if !mv.is_castle() {
        return None;
    }
    CastleSide::ALL
        .into_iter()
        .map(CastleSide::info)
        .find(|info| info.king_from == mv.from_square() && info.king_to == mv.to_square())
        .map(|info| info.rook_to)
}

/// Computes the disambiguation flag for `mv` given the full legal-move list
/// it was drawn from: `file` if another same-type, same-color move to the
/// same square differs in file, `rank` if they share file but differ in
/// rank, `both` if neither distinguishes it.
pub fn disambiguation_for(mv: &Move, legal_moves: &[Move]) -> Disambiguation {
    let mut ambiguous = false;
    let mut same_file = false;
    let mut same_rank = false;

    for other in legal_moves {
        if other.piece() == mv.piece() && other.from_square() != mv.from_square() && other.to_square() == mv.to_square() {
            ambiguous = true;
            same_file |= other.from_square().file() == mv.from_square().file();
            same_rank |= other.from_square().rank() == mv.from_square().rank();
        }
    }

    if !ambiguous {
        Disambiguation::None
    } else if !same_file {
        Disambiguation::File
    } else if !same_rank {
        Disambiguation::Rank
    } else {
        Disambiguation::Both
    }
}
