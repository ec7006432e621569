//! End-to-end scenarios for the optimal AI
//!
//! Each scenario sets up a concrete position and checks the move the AI
//! commits to, or the value it assigns to its options.

use oxo::{AiStrategy, Board, Coord, Error, Player, Score, Status};

fn strategy(ai: Player, seed: u64) -> AiStrategy {
    AiStrategy::new(ai, ai.opponent()).unwrap().with_seed(seed)
}

mod tactical_play {
    use super::*;

    #[test]
    fn blocks_imminent_loss_on_the_double_corner() {
        // X . .
        // . O .
        // . . X
        //
        // X holds opposite corners around the AI's center. Any corner
        // reply loses to a fork; only the four edge cells hold the draw.
        let board = Board::from_string("X.. .O. ..X").unwrap();
        let mut ai = strategy(Player::O, 1);

        let coord = ai.best_action(&board).unwrap();
        let value = ai.action_value(&board, coord);

        assert!(
            value >= Score::Draw,
            "chosen move {coord} must not lose, got {value:?}"
        );
        let edges = [
            Coord::new(1, 0),
            Coord::new(0, 1),
            Coord::new(2, 1),
            Coord::new(1, 2),
        ];
        assert!(
            edges.contains(&coord),
            "only edge replies avoid the fork, got {coord}"
        );
    }

    #[test]
    fn takes_the_win() {
        // O O .
        // X X .
        // . . .
        let board = Board::from_string("OO. XX. ...").unwrap();
        let mut ai = strategy(Player::O, 2);

        let coord = ai.best_action(&board).unwrap();

        assert_eq!(coord, Coord::new(2, 0));
        assert_eq!(ai.action_value(&board, coord), Score::Win);
    }

    #[test]
    fn prefers_own_win_over_blocking() {
        // Same position: X also threatens the middle row, but completing
        // the AI's own line outranks the block.
        let board = Board::from_string("OO. XX. ...").unwrap();

        // The choice must not depend on the tie-break seed
        for seed in 0..20 {
            let mut ai = strategy(Player::O, seed);
            assert_eq!(ai.best_action(&board).unwrap(), Coord::new(2, 0));
        }
    }
}

mod openings {
    use super::*;

    #[test]
    fn empty_board_opening_holds_the_draw() {
        let board = Board::new();
        let mut ai = strategy(Player::X, 3);

        let coord = ai.best_action(&board).unwrap();

        assert_eq!(
            ai.action_value(&board, coord),
            Score::Draw,
            "perfect play from the empty board is a draw"
        );
    }
}

mod forced_positions {
    use super::*;

    #[test]
    fn forced_tie_takes_the_last_cell() {
        // X O X
        // X O O
        // O X .
        let board = Board::from_string("XOX XOO OX.").unwrap();
        let mut ai = strategy(Player::X, 4);

        let coord = ai.best_action(&board).unwrap();
        assert_eq!(coord, Coord::new(2, 2), "only one cell is free");

        let finished = board.append(coord, Player::X);
        assert_eq!(finished.status(), Status::Draw);
    }
}

mod terminal_refusal {
    use super::*;

    #[test]
    fn best_action_refuses_won_board() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        let mut ai = strategy(Player::O, 5);
        assert!(matches!(ai.best_action(&board), Err(Error::GameOver)));
    }

    #[test]
    fn make_move_refuses_drawn_board() {
        let mut board = Board::from_string("XOX XXO OXO").unwrap();
        assert_eq!(board.status(), Status::Draw);

        let mut ai = strategy(Player::X, 6);
        assert!(matches!(ai.make_move(&mut board), Err(Error::GameOver)));
    }
}
