use std::sync::Arc;

use thiserror::Error;

use crate::geometry::Square;

/// Library-wide error type covering both board-state failures and the
/// session/transport failures a [`crate::board::BoardEngine`] consumer runs
/// into while talking to an engine over a connection.
///
/// `ParseError` is never actually constructed: a malformed protocol line
/// comes back as `Message::Unknown` rather than an error a caller has to
/// handle.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("board is not in setup mode")]
    NotInSetupMode,
    #[error("board is in setup mode")]
    InSetupMode,
    #[error("no move to undo")]
    NothingToUndo,
    #[error("invalid FEN: {0}")]
    Fen(#[from] crate::fen::ParseFenError),
    #[error("setup position is invalid: {reason}")]
    SetupInvariant { reason: String },
    #[error("could not parse protocol message: {0}")]
    ParseError(String),
    #[error("I/O error communicating with the connectable: {0}")]
    IOError(Arc<std::io::Error>),
    #[error("operation is not valid in the current session state")]
    ProtocolState,
}

impl PartialEq for CoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IllegalMove { from: f1, to: t1 }, Self::IllegalMove { from: f2, to: t2 }) => {
                f1 == f2 && t1 == t2
            }
            (Self::NotInSetupMode, Self::NotInSetupMode) => true,
            (Self::InSetupMode, Self::InSetupMode) => true,
            (Self::NothingToUndo, Self::NothingToUndo) => true,
            (Self::Fen(a), Self::Fen(b)) => a == b,
            (Self::SetupInvariant { reason: a }, Self::SetupInvariant { reason: b }) => a == b,
            (Self::ParseError(a), Self::ParseError(b)) => a == b,
            (Self::ProtocolState, Self::ProtocolState) => true,
            (Self::IOError(a), Self::IOError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Eq for CoreError {}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(Arc::new(err))
    }
}
