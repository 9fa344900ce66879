//! End-to-end scenarios driving the generator, evaluator, and search
//! together on concrete positions.

use rampart_core::{generate_legal_moves, Board, Square};
use rampart_engine::{evaluate, search, MATE};

fn board(fen: &str) -> Board {
    fen.parse().expect("scenario FEN parses")
}

#[test]
fn startpos_depth_one_picks_one_of_the_twenty_openers() {
    let mut board = Board::starting_position();
    let openers = generate_legal_moves(&board);
    assert_eq!(openers.len(), 20);

    let result = search(&mut board, 1);
    let best = result.best_move.expect("startpos is not terminal");
    assert!(openers.iter().any(|m| *m == best));
}

#[test]
fn pawn_blocked_by_king_standoff_cannot_advance() {
    // Kings face off around the d4 pawn; the pawn is blocked by the black
    // king and the white king cannot step forward either.
    let board = board("8/8/8/3k4/3P4/3K4/8/8 w - - 0 1");
    let moves = generate_legal_moves(&board);
    assert!(moves.iter().all(|m| m.from() != Square::D4));
}

#[test]
fn pawn_pinned_on_the_d_file_stays_there() {
    // The rook on d8 pins the d4 pawn to its king: the push stays legal
    // but the capture on e5 would open the file and is never emitted.
    let board = board("3r4/8/4k3/4p3/3P4/3K4/8/8 w - - 0 1");
    let moves = generate_legal_moves(&board);
    assert!(moves.find(Square::D4, Square::D5, None).is_some());
    assert!(moves.find(Square::D4, Square::E5, None).is_none());
}

#[test]
fn fools_mate_is_terminal_and_lost_for_white() {
    let board = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(generate_legal_moves(&board).is_empty());
    assert!(board.in_check());
    assert_eq!(evaluate(&board), -MATE);
}

#[test]
fn lone_pawn_on_the_seventh_promotes_four_ways() {
    let mut board = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    // March the pawn to e7 by hand.
    for (from, to, reply_from, reply_to) in [
        (Square::E2, Square::E4, Square::E8, Square::D8),
        (Square::E4, Square::E5, Square::D8, Square::C8),
        (Square::E5, Square::E6, Square::C8, Square::B8),
        (Square::E6, Square::E7, Square::B8, Square::A8),
    ] {
        let moves = generate_legal_moves(&board);
        let push = moves.find(from, to, None).expect("pawn push is legal");
        board.make_move(push);
        let moves = generate_legal_moves(&board);
        let reply = moves.find(reply_from, reply_to, None).expect("king walk is legal");
        board.make_move(reply);
    }

    let moves = generate_legal_moves(&board);
    let promotions: Vec<String> = moves
        .iter()
        .filter(|m| m.is_promotion())
        .map(|m| m.to_string())
        .collect();
    assert_eq!(promotions, vec!["e7e8q", "e7e8r", "e7e8b", "e7e8n"]);
}

#[test]
fn en_passant_that_uncovers_a_rank_check_is_never_emitted() {
    let board = board("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    let moves = generate_legal_moves(&board);
    assert!(moves.find(Square::E5, Square::D6, None).is_none());
}

#[test]
fn castling_is_dropped_while_f1_is_covered() {
    let board = board("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = generate_legal_moves(&board);
    assert!(moves.find(Square::E1, Square::G1, None).is_none());
    assert!(moves.find(Square::E1, Square::C1, None).is_some());
}

#[test]
fn search_survives_a_sharp_endgame_intact() {
    // A position dense with pins and en-passant traps: the search must
    // return a move and leave the board exactly as it found it.
    let mut board = board("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    let snapshot = board.clone();
    let result = search(&mut board, 3);
    assert!(board == snapshot);
    assert!(result.best_move.is_some());
}

#[test]
fn mate_scores_propagate_through_the_search() {
    // White mates in one from several candidate moves; the search must
    // report the mate score, not merely a material count.
    let mut board = board("4k3/3ppp2/8/8/8/8/8/4K2R w - - 0 1");
    let result = search(&mut board, 3);
    assert_eq!(result.score, MATE);
    assert_eq!(result.best_move.unwrap().to_string(), "h1h8");
}
