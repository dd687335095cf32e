//! Randomized time-travel testing
//!
//! Plays random games with random jumps mixed in and checks after every
//! transition that:
//! - history entry k holds exactly k marks, alternating from player one
//! - each entry differs from the previous one by a single new mark
//! - the cursor stays inside the history
//! - outcome and highlights match a fresh evaluation of the board at the cursor
//! - ignored transitions leave the game untouched

use rand::prelude::*;
use tictactoe_core::{Board, Game, Ignored, Outcome, Player, Pos, Transition};

fn check_invariants(game: &Game) {
    let history = game.history();
    assert!(!history.is_empty());
    assert!(game.cursor() < history.len(), "cursor {} past history", game.cursor());
    assert_eq!(history[0], Board::new());

    for (k, board) in history.iter().enumerate() {
        assert_eq!(board.filled(), k, "entry {} has wrong mark count: {:?}", k, board);
        assert_eq!(board.count(Player::One), (k + 1) / 2, "entry {}: {:?}", k, board);
        assert_eq!(board.count(Player::Two), k / 2, "entry {}: {:?}", k, board);

        if k > 0 {
            let placed = game.move_at(k).expect("every later entry records its move");
            assert_eq!(history[k - 1].with_mark(placed, Player::to_move_after(k - 1)), *board);
            // No entry before the last is decided: play stops at the first win or draw
            assert!(history[k - 1].evaluate().is_none());
        }
    }

    let board = game.board();
    let expected = match board.evaluate() {
        Some(win) => Outcome::Win(win),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Ongoing,
    };
    assert_eq!(game.outcome(), expected);

    for pos in Pos::all() {
        let on_line = expected.line().is_some_and(|line| line.contains(&pos));
        assert_eq!(game.is_highlighted(pos), on_line, "highlight at {:?}", pos);
    }

    assert_eq!(game.current_player(), Player::to_move_after(game.cursor()));
}

#[test]
fn test_random_timelines() {
    let mut rng = rand::rng();

    for _ in 0..500 {
        let mut game = Game::new();

        for _ in 0..30 {
            let before = game.clone();
            let transition = if rng.random_bool(0.25) {
                let step = rng.random_range(0..game.history().len() + 1);
                game.jump_to(step)
            } else {
                let index = rng.random_range(0..10);
                game.apply_move(index)
            };

            if let Transition::Ignored(_) = transition {
                assert_eq!(game, before, "ignored transition changed state");
            }
            check_invariants(&game);
        }
    }
}

#[test]
fn test_ignored_reasons_are_precise() {
    let mut rng = rand::rng();

    for _ in 0..200 {
        let mut game = Game::new();
        for _ in 0..12 {
            let index = rng.random_range(0..9);
            let decided = game.outcome().is_decided();
            let occupied = !game.board().is_empty(Pos(index as u8));

            match game.apply_move(index) {
                Transition::Applied => assert!(!decided && !occupied),
                Transition::Ignored(Ignored::GameDecided) => assert!(decided),
                Transition::Ignored(Ignored::CellOccupied(pos)) => {
                    assert!(!decided && occupied);
                    assert_eq!(pos, Pos(index as u8));
                }
                other => panic!("unexpected transition {:?}", other),
            }
        }
    }
}

#[test]
fn test_branch_and_overwrite() {
    let mut game = Game::new();
    assert!(game.apply_move(0).is_applied());
    assert!(game.apply_move(4).is_applied());
    assert_eq!(game.cursor(), 2);
    let future = game.history()[2];

    assert!(game.jump_to(1).is_applied());
    assert!(game.apply_move(5).is_applied());

    assert_eq!(game.history().len(), 3);
    assert!(!game.history().contains(&future));
    assert_eq!(game.move_at(2), Some(Pos(5)));
    check_invariants(&game);
}

#[test]
fn test_jump_to_zero_always_restores_start() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let mut game = Game::new();
        for _ in 0..rng.random_range(0..9) {
            let _ = game.apply_move(rng.random_range(0..9));
        }
        let len = game.history().len();

        assert!(game.jump_to(0).is_applied());
        assert_eq!(game.board(), Board::new());
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.outcome(), Outcome::Ongoing);
        assert_eq!(game.history().len(), len);
    }
}

#[test]
fn test_full_board_examples() {
    let a = Some(Player::One);
    let b = Some(Player::Two);
    let e = None;

    let win = Board::from_cells([a, a, a, e, e, e, e, e, e]).evaluate().unwrap();
    assert_eq!(win.winner, Player::One);
    assert_eq!(win.line, [Pos(0), Pos(1), Pos(2)]);

    // Not reachable by play, but the evaluator only looks at lines
    let full = Board::from_cells([a, b, a, b, a, b, b, a, b]);
    assert!(full.is_full());
    assert_eq!(full.evaluate(), None);

    // X O X / X O O / O X X
    let mut game = Game::new();
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        assert!(game.apply_move(index).is_applied(), "move {}", index);
    }
    assert_eq!(game.board(), Board::from_cells([a, b, a, a, b, b, b, a, a]));
    assert_eq!(game.outcome(), Outcome::Draw);
    check_invariants(&game);
}
