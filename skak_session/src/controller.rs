use std::sync::{Arc, Mutex};
use std::time::Duration;

use skak_core::board::BoardEngine;
use skak_core::error::CoreError;
use skak_core::geometry::Square;
use skak_core::piece::PieceType;
use skak_core::uci_move::LongAlgebraicMove;
use skak_protocol::{UCIMessage, UCIPosition, UCIPositionBase, UCITimeControl};

use crate::event::{Event, SessionListener};
use crate::server_session::{ServerEvent, ServerSessionListener};
use crate::session::Session;

const DEFAULT_GO_TIME: Duration = Duration::from_secs(2);

fn go_request(board: &BoardEngine) -> UCIMessage {
    UCIMessage::Position(UCIPosition { base: UCIPositionBase::Fen(board.to_fen()), moves: Vec::new() })
}

fn go_command() -> UCIMessage {
    UCIMessage::Go {
        time_control: Some(UCITimeControl::MoveTime(DEFAULT_GO_TIME)),
        search_control: None,
    }
}

/// Two humans sharing one board; moves are applied directly, no engine
/// session involved.
pub struct HumanVsHuman {
    pub board: Mutex<BoardEngine>,
}

impl HumanVsHuman {
    pub fn new(board: BoardEngine) -> Self {
        Self { board: Mutex::new(board) }
    }

    pub fn make_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<(), CoreError> {
        self.board.lock().unwrap().make_move(from, to, promotion)?;
        Ok(())
    }
}

/// A human playing against a locally or remotely running engine. Human moves
/// are applied to the board immediately and the resulting position is sent
/// to the engine with a `go`; the engine's `bestmove` reply is applied back
/// once it arrives.
pub struct HumanVsEngine {
    pub board: Mutex<BoardEngine>,
    pub engine: Arc<Session>,
}

impl HumanVsEngine {
    pub fn new(board: BoardEngine, engine: Arc<Session>) -> Self {
        Self { board: Mutex::new(board), engine }
    }

    pub fn make_human_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<(), CoreError> {
        let snapshot = {
            let mut board = self.board.lock().unwrap();
            board.make_move(from, to, promotion)?;
            board.to_fen()
        };
        self.engine.send_message(&UCIMessage::Position(UCIPosition {
            base: UCIPositionBase::Fen(snapshot),
            moves: Vec::new(),
        }));
        self.engine.send_message(&go_command());
        Ok(())
    }

    pub fn apply_engine_best_move(&self, best_move: LongAlgebraicMove) -> Result<(), CoreError> {
        self.board
            .lock()
            .unwrap()
            .make_move(best_move.from, best_move.to, best_move.promotion)?;
        Ok(())
    }
}

/// Listens to a [`HumanVsEngine`]'s engine session and plays the engine's
/// replies onto the board automatically.
pub struct EngineReplyListener {
    pub controller: Arc<HumanVsEngine>,
}

impl SessionListener for EngineReplyListener {
    fn on_event(&self, event: Event) {
        if let Event::Message(UCIMessage::BestMove { best_move, .. }) = event {
            let _ = self.controller.apply_engine_best_move(best_move);
        }
    }
}

/// Two engines playing each other; each side's `bestmove` is applied to the
/// shared board and immediately forwarded to the other engine as a new `go`.
pub struct EngineVsEngine {
    pub board: Mutex<BoardEngine>,
    pub white: Arc<Session>,
    pub black: Arc<Session>,
}

impl EngineVsEngine {
    pub fn new(board: BoardEngine, white: Arc<Session>, black: Arc<Session>) -> Self {
        Self { board: Mutex::new(board), white, black }
    }

    pub fn start(&self) {
        self.white.send_message(&go_request(&self.board.lock().unwrap()));
        self.white.send_message(&go_command());
    }

    pub fn apply_move(&self, mover: &Session, best_move: LongAlgebraicMove) -> Result<(), CoreError> {
        let snapshot = {
            let mut board = self.board.lock().unwrap();
            board.make_move(best_move.from, best_move.to, best_move.promotion)?;
            board.to_fen()
        };

        let opponent = if std::ptr::eq(mover, self.white.as_ref()) { &self.black } else { &self.white };
        opponent.send_message(&UCIMessage::Position(UCIPosition {
            base: UCIPositionBase::Fen(snapshot),
            moves: Vec::new(),
        }));
        opponent.send_message(&go_command());
        Ok(())
    }
}

/// Mirrors a brokered client/engine exchange into a read-only board, so a
/// spectator can watch a game it isn't actually playing.
pub struct SpectatedServer {
    pub board: Mutex<BoardEngine>,
}

impl SpectatedServer {
    pub fn new() -> Self {
        Self { board: Mutex::new(BoardEngine::new()) }
    }
}

impl Default for SpectatedServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerSessionListener for SpectatedServer {
    fn on_server_event(&self, event: ServerEvent) {
        match event {
            ServerEvent::FromClient(UCIMessage::Position(UCIPosition { base, moves })) => {
                let mut board = self.board.lock().unwrap();
                *board = match base {
                    UCIPositionBase::StartPos => BoardEngine::new(),
                    UCIPositionBase::Fen(fen) => BoardEngine::from_fen(&fen).unwrap_or_else(|_| BoardEngine::new()),
                };
                for m in moves {
                    let _ = board.make_move(m.from, m.to, m.promotion);
                }
            }
            ServerEvent::FromEngine(UCIMessage::BestMove { best_move, .. }) => {
                let _ = self
                    .board
                    .lock()
                    .unwrap()
                    .make_move(best_move.from, best_move.to, best_move.promotion);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn human_vs_human_applies_legal_moves_to_the_shared_board() {
        let controller = HumanVsHuman::new(BoardEngine::new());
        controller.make_move(Square::E2, Square::E4, None).unwrap();
        assert_eq!(controller.board.lock().unwrap().ply_count(), 1);
    }

    #[test]
    fn human_vs_human_rejects_illegal_moves() {
        let controller = HumanVsHuman::new(BoardEngine::new());
        assert!(controller.make_move(Square::E2, Square::E5, None).is_err());
    }

    #[test]
    fn spectated_server_mirrors_client_position_and_engine_bestmove() {
        let spectator = SpectatedServer::new();

        spectator.on_server_event(ServerEvent::FromClient(UCIMessage::Position(UCIPosition {
            base: UCIPositionBase::StartPos,
            moves: vec![LongAlgebraicMove { from: Square::E2, to: Square::E4, promotion: None }],
        })));
        assert_eq!(spectator.board.lock().unwrap().ply_count(), 1);

        spectator.on_server_event(ServerEvent::FromEngine(UCIMessage::BestMove {
            best_move: LongAlgebraicMove { from: Square::E7, to: Square::E5, promotion: None },
            ponder: None,
        }));
        assert_eq!(spectator.board.lock().unwrap().ply_count(), 2);
    }
}
