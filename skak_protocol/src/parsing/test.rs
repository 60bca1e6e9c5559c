use std::time::Duration;

use pretty_assertions::assert_eq;
use skak_core::geometry::Square;
use skak_core::piece::PieceType;
use skak_core::uci_move::LongAlgebraicMove;

use crate::uci_message::ProtectionState;
use crate::{parse_message, UCIInfo, UCIMessage, UCIOptionConfig, UCIPosition, UCIPositionBase};

fn mv(from: Square, to: Square) -> LongAlgebraicMove {
    LongAlgebraicMove { from, to, promotion: None }
}

#[test]
fn parse_empty_is_unknown() {
    assert_eq!(parse_message(""), UCIMessage::Unknown(String::new()));
}

#[test]
fn parse_uci() {
    assert_eq!(parse_message("uci"), UCIMessage::UCI);
}

#[test]
fn parse_uci_accepts_whitespace_and_newlines() {
    assert_eq!(parse_message("\tuci\n"), UCIMessage::UCI);
    assert_eq!(parse_message("    uci\r\n"), UCIMessage::UCI);
}

#[test]
fn parse_debug() {
    assert_eq!(parse_message("debug"), UCIMessage::Debug(true));
    assert_eq!(parse_message("debug on"), UCIMessage::Debug(true));
    assert_eq!(parse_message("debug off"), UCIMessage::Debug(false));
}

#[test]
fn parse_ignores_unknown_preceding_tokens() {
    assert_eq!(parse_message("joho debug on"), UCIMessage::Debug(true));
}

#[test]
fn parse_ignores_unknown_following_tokens() {
    assert_eq!(parse_message("debug on joho"), UCIMessage::Debug(true));
}

#[test]
fn parse_isready() {
    assert_eq!(parse_message("isready"), UCIMessage::IsReady);
}

#[test]
fn parse_setoption_name_and_value() {
    assert_eq!(
        parse_message("setoption name Nullmove value true"),
        UCIMessage::SetOption {
            name: "Nullmove".to_string(),
            value: Some("true".to_string()),
        }
    );
}

#[test]
fn parse_setoption_uci_opponent() {
    let msg = parse_message("setoption name UCI_Opponent value GM 2800 human Magnus Carlsen");
    match msg {
        UCIMessage::SetOption { name, value } => {
            assert_eq!(name, "UCI_Opponent");
            let opponent = crate::UCIOpponent::parse(&value.unwrap()).unwrap();
            assert_eq!(opponent.name, "Magnus Carlsen");
            assert_eq!(opponent.elo, Some(2800));
        }
        other => panic!("expected SetOption, got {other:?}"),
    }
}

#[test]
fn parse_position_startpos_with_moves() {
    let msg = parse_message("position startpos moves e2e4 e7e5");
    assert_eq!(
        msg,
        UCIMessage::Position(UCIPosition {
            base: UCIPositionBase::StartPos,
            moves: vec![mv(Square::E2, Square::E4), mv(Square::E7, Square::E5)],
        })
    );
}

#[test]
fn parse_position_fen() {
    let msg = parse_message("position fen 8/8/8/8/8/8/8/K6k w - - 0 1");
    assert_eq!(
        msg,
        UCIMessage::Position(UCIPosition {
            base: UCIPositionBase::Fen("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()),
            moves: vec![],
        })
    );
}

#[test]
fn parse_go_movetime() {
    let msg = parse_message("go movetime 1000");
    match msg {
        UCIMessage::Go { time_control, .. } => {
            assert_eq!(
                time_control,
                Some(crate::UCITimeControl::MoveTime(Duration::from_millis(1000)))
            );
        }
        other => panic!("expected Go, got {other:?}"),
    }
}

#[test]
fn parse_go_with_search_moves() {
    let msg = parse_message("go searchmoves e2e4 d2d4 depth 5");
    match msg {
        UCIMessage::Go { search_control, .. } => {
            let sc = search_control.unwrap();
            assert_eq!(sc.depth, Some(5));
            assert_eq!(sc.search_moves, vec![mv(Square::E2, Square::E4), mv(Square::D2, Square::D4)]);
        }
        other => panic!("expected Go, got {other:?}"),
    }
}

#[test]
fn parse_bestmove_with_ponder() {
    let msg = parse_message("bestmove e2e4 ponder e7e5");
    assert_eq!(
        msg,
        UCIMessage::BestMove {
            best_move: mv(Square::E2, Square::E4),
            ponder: Some(mv(Square::E7, Square::E5)),
        }
    );
}

#[test]
fn parse_promotion_move() {
    let msg = parse_message("bestmove a7a8q");
    assert_eq!(
        msg,
        UCIMessage::BestMove {
            best_move: LongAlgebraicMove { from: Square::A7, to: Square::A8, promotion: Some(PieceType::Queen) },
            ponder: None,
        }
    );
}

#[test]
fn parse_option_spin() {
    let msg = parse_message("option name Hash type spin default 32 min 1 max 4096");
    assert_eq!(
        msg,
        UCIMessage::Option(UCIOptionConfig::Spin {
            name: "Hash".to_string(),
            default: Some(32),
            min: Some(1),
            max: Some(4096),
        })
    );
}

#[test]
fn parse_info_score() {
    let msg = parse_message("info depth 10 score cp 42 nodes 1000");
    match msg {
        UCIMessage::Info(UCIInfo { depth, score, nodes, .. }) => {
            assert_eq!(depth, Some(10));
            assert_eq!(nodes, Some(1000));
            assert_eq!(score.unwrap().cp, Some(42));
        }
        other => panic!("expected Info, got {other:?}"),
    }
}

#[test]
fn parse_unrecognized_line_is_unknown() {
    assert_eq!(
        parse_message("frobnicate the gibson"),
        UCIMessage::Unknown("frobnicate the gibson".to_string())
    );
}

#[test]
fn copy_protection_round_trips() {
    let msg = parse_message("copyprotection checking");
    assert_eq!(msg, UCIMessage::CopyProtection(ProtectionState::Checking));
    assert_eq!(msg.to_string(), "copyprotection checking");
}
