use std::collections::HashMap;

use crate::castling::{CastleSide, CastlingRights};
use crate::error::CoreError;
use crate::fen::{parse_fen, to_fen};
use crate::fingerprint::Fingerprint;
use crate::geometry::Square;
use crate::mv::Move;
use crate::move_gen::{disambiguation_for, Position as MoveGenPosition};
use crate::piece::{Color, Piece, PieceType};
use crate::piece_index::PieceIndex;
use crate::position::{PositionState, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseDirection {
    First,
    Previous,
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    DrawThreefold,
    DrawFiftyMove,
}

const FIFTY_MOVE_HALFMOVE_LIMIT: u32 = 100;
const THREEFOLD_COUNT: u32 = 3;

fn fingerprint_of(pieces: &PieceIndex, state: &PositionState) -> Fingerprint {
    let mut fp = Fingerprint::default();
    for (square, piece) in pieces.iter_occupied() {
        fp.toggle_piece(piece, square);
    }
    fp ^= Fingerprint::side_to_move(state.side_to_move());
    fp ^= Fingerprint::castling(state.castling_rights());
    fp ^= Fingerprint::en_passant(state.en_passant());
    fp
}

/// Owns the full history of a game as a sequence of full snapshots (piece
/// placement plus position state) re-cloned at every ply, a cursor for
/// browsing that history, and the running repetition table used for
/// threefold-draw detection.
///
/// Move legality and check/checkmate detection are delegated to
/// [`crate::move_gen::Position`], built fresh from the snapshot at the
/// relevant ply.
pub struct BoardEngine {
    history: Vec<Snapshot>,
    moves: Vec<Move>,
    cursor: usize,
    repetition_counts: HashMap<Fingerprint, u32>,
    setup_mode: bool,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEngine {
    pub fn new() -> Self {
        let pieces = starting_pieces();
        let state = PositionState::new();
        Self::from_snapshot(Snapshot::new(pieces, state))
    }

    pub fn from_fen(fen: &str) -> Result<Self, CoreError> {
        let (pieces, state) = parse_fen(fen)?;
        Ok(Self::from_snapshot(Snapshot::new(pieces, state)))
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut repetition_counts = HashMap::new();
        repetition_counts.insert(fingerprint_of(&snapshot.pieces, &snapshot.state), 1);
        Self {
            history: vec![snapshot],
            moves: Vec::new(),
            cursor: 0,
            repetition_counts,
            setup_mode: false,
        }
    }

    pub fn to_fen(&self) -> String {
        let snapshot = self.current_snapshot();
        to_fen(&snapshot.pieces, &snapshot.state)
    }

    pub fn current_pieces(&self) -> &PieceIndex {
        &self.current_snapshot().pieces
    }

    pub fn current_state(&self) -> &PositionState {
        &self.current_snapshot().state
    }

    pub fn moves_played(&self) -> &[Move] {
        &self.moves
    }

    /// The side to move in the position the game (or setup-mode edit)
    /// started from, before any moves were played.
    pub fn starting_side_to_move(&self) -> Color {
        self.history[0].state.side_to_move()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ply_count(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_setup_mode(&self) -> bool {
        self.setup_mode
    }

    fn current_snapshot(&self) -> &Snapshot {
        &self.history[self.cursor]
    }

    fn move_gen_position(snapshot: &Snapshot) -> MoveGenPosition<'_> {
        MoveGenPosition::new(&snapshot.pieces, snapshot.state.castling_rights(), snapshot.state.en_passant())
    }

    pub fn make_move(&mut self, from: Square, to: Square, promotion: Option<PieceType>) -> Result<Move, CoreError> {
        if self.setup_mode {
            return Err(CoreError::InSetupMode);
        }

        let snapshot = self.current_snapshot().clone();
        let side = snapshot.state.side_to_move();
        let gen = Self::move_gen_position(&snapshot);
        let legal_moves = gen.legal_moves_from(side, from);

        let chosen = legal_moves
            .iter()
            .find(|m| m.to_square() == to && m.promotion() == promotion)
            .copied()
            .ok_or_else(|| {
                tracing::debug!(%from, %to, ?promotion, "rejected illegal move");
                CoreError::IllegalMove { from, to }
            })?;

        let mut next_pieces = snapshot.pieces.clone();
        let mut next_state = snapshot.state.clone();

        apply_move(&chosen, &mut next_pieces, &mut next_state);

        let all_legal_before = gen.all_legal_moves(side);
        let mut finished_move = chosen;
        finished_move.set_disambiguation(disambiguation_for(&chosen, &all_legal_before));

        let opponent = side.flip();
        let next_gen = MoveGenPosition::new(&next_pieces, next_state.castling_rights(), next_state.en_passant());
        let opponent_state = next_gen.king_state(opponent, Some(&finished_move));
        finished_move.set_check_state(opponent_state.in_check, opponent_state.in_check && opponent_state.has_no_moves);

        // Discard any future beyond the cursor (branching off a browsed-back position).
        self.truncate_future();

        self.history.push(Snapshot::new(next_pieces, next_state));
        self.moves.push(finished_move);
        self.cursor = self.history.len() - 1;

        *self.repetition_counts.entry(fingerprint_of(&self.history[self.cursor].pieces, &self.history[self.cursor].state)).or_insert(0) += 1;

        if finished_move.is_checkmate() {
            tracing::info!(ply = self.cursor, "checkmate delivered");
        }

        Ok(finished_move)
    }

    pub fn undo_move(&mut self) -> Result<Move, CoreError> {
        if self.moves.is_empty() {
            return Err(CoreError::NothingToUndo);
        }

        let removed_snapshot = self.history.pop().expect("history has at least one entry per move");
        if let Some(count) = self.repetition_counts.get_mut(&fingerprint_of(&removed_snapshot.pieces, &removed_snapshot.state)) {
            *count -= 1;
        }

        let undone = self.moves.pop().expect("checked above");
        self.cursor = self.cursor.min(self.history.len() - 1);
        Ok(undone)
    }

    fn truncate_future(&mut self) {
        while self.history.len() - 1 > self.cursor {
            let dropped = self.history.pop().expect("loop invariant");
            if let Some(count) = self.repetition_counts.get_mut(&fingerprint_of(&dropped.pieces, &dropped.state)) {
                *count -= 1;
            }
            self.moves.pop();
        }
    }

    pub fn browse(&mut self, direction: BrowseDirection) -> usize {
        self.cursor = match direction {
            BrowseDirection::First => 0,
            BrowseDirection::Previous => self.cursor.saturating_sub(1),
            BrowseDirection::Next => (self.cursor + 1).min(self.history.len() - 1),
            BrowseDirection::Last => self.history.len() - 1,
        };
        self.cursor
    }

    pub fn enter_setup_mode(&mut self) {
        self.truncate_future();
        self.cursor = self.history.len() - 1;
        self.setup_mode = true;
    }

    /// Commits the edited position as a new game, discarding history.
    ///
    /// Fails with [`CoreError::SetupInvariant`] if either side doesn't have
    /// exactly one king on the board; setup mode stays active in that case
    /// so the caller can fix the position and retry.
    pub fn exit_setup_mode(&mut self) -> Result<(), CoreError> {
        if !self.setup_mode {
            return Ok(());
        }

        let pieces = &self.history[self.cursor].pieces;
        for color in [Color::White, Color::Black] {
            let kings = pieces.group_size(Piece::new(color, PieceType::King));
            if kings != 1 {
                return Err(CoreError::SetupInvariant {
                    reason: format!("{color:?} has {kings} kings, expected exactly 1"),
                });
            }
        }

        self.setup_mode = false;

        let snapshot = self.history[self.cursor].clone();
        *self = Self::from_snapshot(snapshot);
        Ok(())
    }

    pub fn place(&mut self, square: Square, piece: Option<Piece>) -> Result<(), CoreError> {
        if !self.setup_mode {
            return Err(CoreError::NotInSetupMode);
        }
        let pieces = &mut self.history[self.cursor].pieces;
        match piece {
            Some(piece) => pieces.set(piece, square),
            None => {
                pieces.remove(square);
            }
        }
        Ok(())
    }

    pub fn move_in_setup(&mut self, from: Square, to: Square) -> Result<(), CoreError> {
        if !self.setup_mode {
            return Err(CoreError::NotInSetupMode);
        }
        let pieces = &mut self.history[self.cursor].pieces;
        if let Some(piece) = pieces.remove(from) {
            pieces.set(piece, to);
        }
        Ok(())
    }

    pub fn set_side_to_move(&mut self, color: Color) -> Result<(), CoreError> {
        if !self.setup_mode {
            return Err(CoreError::NotInSetupMode);
        }
        self.history[self.cursor].state.set_side_to_move(color);
        Ok(())
    }

    pub fn terminal_state(&self) -> TerminalState {
        let snapshot = self.current_snapshot();
        let side = snapshot.state.side_to_move();

        let fingerprint = fingerprint_of(&snapshot.pieces, &snapshot.state);
        if self.repetition_counts.get(&fingerprint).copied().unwrap_or(0) >= THREEFOLD_COUNT {
            return TerminalState::DrawThreefold;
        }
        if snapshot.state.halfmove_clock() >= FIFTY_MOVE_HALFMOVE_LIMIT {
            return TerminalState::DrawFiftyMove;
        }

        let gen = Self::move_gen_position(snapshot);
        let king_state = gen.king_state(side, self.moves.last());

        match (king_state.in_check, king_state.has_no_moves) {
            (true, true) => TerminalState::Checkmate,
            (true, false) => TerminalState::Check,
            (false, true) => TerminalState::Stalemate,
            (false, false) => TerminalState::Ongoing,
        }
    }
}

fn starting_pieces() -> PieceIndex {
    let (pieces, _) = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").expect("valid starting FEN");
    pieces
}

fn apply_move(mv: &Move, pieces: &mut PieceIndex, state: &mut PositionState) {
    let side = mv.piece().color();

    pieces.remove(mv.from_square());

    if mv.is_en_passant() {
        let captured_square = Square::new(mv.from_square().rank() as i8, mv.to_square().file() as i8).expect("same rank as mover");
        pieces.remove(captured_square);
    }

    if let Some(captured) = mv.captured() {
        state.push_captured(captured);
    }

    let placed = match mv.promotion() {
        Some(promotion) => Piece::new(side, promotion),
        None => mv.piece(),
    };
    pieces.set(placed, mv.to_square());

    if mv.is_castle() {
        if let Some(info) = CastleSide::ALL
            .into_iter()
            .map(CastleSide::info)
            .find(|info| info.king_from == mv.from_square() && info.king_to == mv.to_square())
        {
            if let Some(rook) = pieces.remove(info.rook_from) {
                pieces.set(rook, info.rook_to);
            }
        }
    }

    let mut revoked = CastlingRights::empty();
    if mv.piece().piece_type() == PieceType::King {
        revoked |= CastlingRights::for_color(side);
    }
    revoked |= revocation_for_square(mv.from_square());
    revoked |= revocation_for_square(mv.to_square());
    state.revoke_castling_rights(revoked);

    state.set_en_passant(if mv.is_double_pawn_push() {
        Some(mv.piece().color().pawn_push_direction().step(mv.from_square()).expect("double push stays on board"))
    } else {
        None
    });

    if mv.piece().piece_type() == PieceType::Pawn || mv.is_capture() {
        state.reset_halfmove_clock();
    } else {
        state.increment_halfmove_clock();
    }

    state.advance_fullmove_number_if_black_just_moved(side);
    state.flip_side_to_move();
}

fn revocation_for_square(square: Square) -> CastlingRights {
    CastleSide::ALL
        .into_iter()
        .map(CastleSide::info)
        .find(|info| info.rook_from == square)
        .map(|info| info.right)
        .unwrap_or(CastlingRights::empty())
}
