use thiserror::Error;

use crate::castling::CastlingRights;
use crate::geometry::Square;
use crate::piece::Piece;
use crate::piece_index::PieceIndex;
use crate::position::PositionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("FEN has no board field")]
    MissingBoard,
    #[error("FEN rank {0:?} does not sum to 8 files")]
    BadRank(String),
    #[error("FEN board has {0} ranks, expected 8")]
    WrongRankCount(usize),
    #[error("invalid piece character {0:?} in FEN")]
    InvalidPieceChar(char),
    #[error("invalid side-to-move field {0:?}")]
    InvalidSideToMove(String),
    #[error("invalid en-passant square {0:?}")]
    InvalidEnPassant(String),
    #[error("invalid clock field {0:?}")]
    InvalidClock(String),
}

/// Parses a FEN string into piece placement and position state.
///
/// Tolerant of missing trailing fields: side-to-move, castling rights,
/// en-passant target, halfmove clock and fullmove number all fall back to
/// their standard-starting-position defaults when absent, rather than
/// requiring all six fields as the full FEN grammar does.
pub fn parse_fen(fen: &str) -> Result<(PieceIndex, PositionState), ParseFenError> {
    let mut fields = fen.split_whitespace();

    let board_field = fields.next().ok_or(ParseFenError::MissingBoard)?;
    let pieces = parse_board_field(board_field)?;

    let mut state = PositionState::new();

    if let Some(side) = fields.next() {
        state.set_side_to_move(match side {
            "w" => crate::piece::Color::White,
            "b" => crate::piece::Color::Black,
            other => return Err(ParseFenError::InvalidSideToMove(other.to_string())),
        });
    }

    if let Some(castling) = fields.next() {
        state.set_castling_rights(CastlingRights::from_fen_str(castling));
    }

    if let Some(ep) = fields.next() {
        if ep == "-" {
            state.set_en_passant(None);
        } else {
            let square: Square = ep.parse().map_err(|_| ParseFenError::InvalidEnPassant(ep.to_string()))?;
            state.set_en_passant(Some(square));
        }
    }

    if let Some(halfmove) = fields.next() {
        let clock: u32 = halfmove.parse().map_err(|_| ParseFenError::InvalidClock(halfmove.to_string()))?;
        state.set_halfmove_clock(clock);
    }

    if let Some(fullmove) = fields.next() {
        let number: u32 = fullmove.parse().map_err(|_| ParseFenError::InvalidClock(fullmove.to_string()))?;
        state.set_fullmove_number(number.max(1));
    }

    Ok((pieces, state))
}

fn parse_board_field(field: &str) -> Result<PieceIndex, ParseFenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::WrongRankCount(ranks.len()));
    }

    let mut pieces = PieceIndex::new();

    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as i8;
        let mut file = 0i8;

        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as i8;
            } else {
                let piece = Piece::try_from_fen_char(c).ok_or(ParseFenError::InvalidPieceChar(c))?;
                let square = Square::new(rank, file).ok_or_else(|| ParseFenError::BadRank(rank_str.to_string()))?;
                pieces.set(piece, square);
                file += 1;
            }
        }

        if file != 8 {
            return Err(ParseFenError::BadRank(rank_str.to_string()));
        }
    }

    Ok(pieces)
}

/// Serializes piece placement and position state into a complete
/// six-field FEN string.
pub fn to_fen(pieces: &PieceIndex, state: &PositionState) -> String {
    let mut board = String::new();
    for rank_from_top in 0..8i8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0;

        for file in 0..8i8 {
            let square = Square::new(rank, file).expect("rank/file in range");
            match pieces.get(square) {
                Some(piece) => {
                    if empty_run > 0 {
                        board.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    board.push(piece.as_fen_char());
                }
                None => empty_run += 1,
            }
        }

        if empty_run > 0 {
            board.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            board.push('/');
        }
    }

    let side = match state.side_to_move() {
        crate::piece::Color::White => "w",
        crate::piece::Color::Black => "b",
    };

    let en_passant = match state.en_passant() {
        Some(sq) => sq.to_string(),
        None => "-".to_string(),
    };

    format!(
        "{board} {side} {} {en_passant} {} {}",
        state.castling_rights().as_fen_str(),
        state.halfmove_clock(),
        state.fullmove_number(),
    )
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::{Color, PieceType};

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parses_starting_position() {
        let (pieces, state) = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(pieces.get(Square::E1), Some(Piece::white(PieceType::King)));
        assert_eq!(pieces.get(Square::E8), Some(Piece::black(PieceType::King)));
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.castling_rights(), CastlingRights::all());
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.fullmove_number(), 1);
    }

    #[test]
    fn round_trips_starting_position() {
        let (pieces, state) = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(to_fen(&pieces, &state), STARTING_FEN);
    }

    #[test]
    fn tolerates_missing_trailing_fields() {
        let (pieces, state) = parse_fen("8/8/8/4k3/8/8/8/4K3 w").unwrap();
        assert_eq!(pieces.get(Square::E5), Some(Piece::black(PieceType::King)));
        assert_eq!(state.castling_rights(), CastlingRights::empty());
        assert_eq!(state.en_passant(), None);
        assert_eq!(state.fullmove_number(), 1);
    }

    #[test]
    fn rejects_bad_rank_sum() {
        assert!(parse_fen("pppppppp/8/8/8/8/8/8/9 w - - 0 1").is_err());
    }

    #[test]
    fn rejects_wrong_rank_count() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
    }
}
