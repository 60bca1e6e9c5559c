use skak_core::board::BoardEngine;
use skak_core::perft::perft;

#[test]
fn starting_position_perft_depth_1() {
    let mut board = BoardEngine::new();
    assert_eq!(perft(&mut board, 1), 20);
}

#[test]
fn starting_position_perft_depth_2() {
    let mut board = BoardEngine::new();
    assert_eq!(perft(&mut board, 2), 400);
}

#[test]
fn starting_position_perft_depth_3() {
    let mut board = BoardEngine::new();
    assert_eq!(perft(&mut board, 3), 8_902);
}

#[test]
fn starting_position_perft_depth_4() {
    let mut board = BoardEngine::new();
    assert_eq!(perft(&mut board, 4), 197_281);
}

#[test]
fn kiwipete_perft_depth_1() {
    // The "Kiwipete" position, a standard perft fixture exercising
    // castling, en passant and promotions together.
    let mut board =
        BoardEngine::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut board, 1), 48);
}

#[test]
fn kiwipete_perft_depth_2() {
    let mut board =
        BoardEngine::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut board, 2), 2_039);
}

#[test]
fn position_3_perft_depth_4() {
    let mut board = BoardEngine::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&mut board, 4), 43_238);
}

#[test]
fn position_4_perft_depth_4() {
    let mut board =
        BoardEngine::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2pP/R2Q1RQ1 w kq - 0 1").unwrap();
    assert_eq!(perft(&mut board, 4), 422_333);
}
