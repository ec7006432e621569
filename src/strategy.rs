//! Optimal tic-tac-toe play
//!
//! The tic-tac-toe specialisation of the minimax search: states are
//! boards, actions are coordinates, and values are three-valued scores
//! from the AI's viewpoint.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Coord, Player, Status},
    error::{Error, Result},
    minimax::Minimax,
};

/// Value of a finished game from the AI's viewpoint.
///
/// Ordered so that `Loss < Draw < Win`, which keeps `max` and `min` total
/// and unambiguous over the three outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Loss,
    Draw,
    Win,
}

/// The symbol assignment for one round: which mark the AI plays and which
/// mark the opponent plays.
///
/// `AiRules` is the [`Minimax`] specialisation. Each expansion folds the
/// opponent's reply into the outcome set, so the recurrence alternates
/// maximisation and minimisation without threading a turn flag through
/// the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiRules {
    ai_player: Player,
    human_player: Player,
}

impl AiRules {
    /// Create the rules for a round.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MatchedPlayers`] when both sides are assigned the
    /// same symbol.
    pub fn new(ai_player: Player, human_player: Player) -> Result<Self> {
        if ai_player == human_player {
            return Err(Error::MatchedPlayers { player: ai_player });
        }
        Ok(AiRules {
            ai_player,
            human_player,
        })
    }

    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    pub fn human_player(&self) -> Player {
        self.human_player
    }

    /// Exchange the symbols of the two sides
    pub fn swapped(self) -> Self {
        AiRules {
            ai_player: self.human_player,
            human_player: self.ai_player,
        }
    }
}

impl Minimax for AiRules {
    type State = Board;
    type Action = Coord;
    type Value = Score;

    /// The free cells of an ongoing board; no actions at terminals
    fn possible_actions(&self, board: &Board) -> Vec<Coord> {
        match board.status() {
            Status::Ongoing => board.free_cells(),
            _ => Vec::new(),
        }
    }

    /// The boards that may follow the AI playing `coord`.
    ///
    /// If the AI's move already ends the game the singleton of that board
    /// is returned; no opponent reply is fabricated. Otherwise there is
    /// one outcome per reply the opponent could make.
    fn possible_outcomes(&self, board: &Board, coord: &Coord) -> Vec<Board> {
        let after_ai = board.append(*coord, self.ai_player);
        if after_ai.status() != Status::Ongoing {
            return vec![after_ai];
        }

        after_ai
            .free_cells()
            .into_iter()
            .map(|reply| after_ai.append(reply, self.human_player))
            .collect()
    }

    /// Terminal scoring from the AI's viewpoint
    fn base_state_value(&self, board: &Board) -> Score {
        match board.status() {
            Status::Won(player) if player == self.ai_player => Score::Win,
            Status::Won(_) => Score::Loss,
            Status::Draw => Score::Draw,
            Status::Ongoing => panic!("base value requested for an ongoing board"),
        }
    }
}

/// The playing AI: minimax rules plus a random source for tie-breaking.
///
/// Equally valued moves are broken uniformly at random so play varies
/// across rounds; seed the strategy to make a game reproducible.
#[derive(Debug)]
pub struct AiStrategy {
    rules: AiRules,
    rng: StdRng,
}

impl AiStrategy {
    /// Create a strategy for the given symbol assignment.
    ///
    /// The tie-breaking random source is seeded from the thread-local
    /// generator; use [`with_seed`](Self::with_seed) for determinism.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MatchedPlayers`] when both sides are assigned the
    /// same symbol.
    pub fn new(ai_player: Player, human_player: Player) -> Result<Self> {
        Ok(AiStrategy {
            rules: AiRules::new(ai_player, human_player)?,
            rng: StdRng::from_rng(&mut rand::rng()),
        })
    }

    /// Pin the tie-breaking random source for reproducible play
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn ai_player(&self) -> Player {
        self.rules.ai_player()
    }

    pub fn human_player(&self) -> Player {
        self.rules.human_player()
    }

    /// The underlying minimax rules, for value queries that need no
    /// random source
    pub fn rules(&self) -> AiRules {
        self.rules
    }

    /// Exchange the symbols of the two sides
    pub fn swap_roles(&mut self) {
        self.rules = self.rules.swapped();
    }

    /// The minimax value of committing to `coord` on `board`
    pub fn action_value(&self, board: &Board, coord: Coord) -> Score {
        self.rules.action_value(board, &coord)
    }

    /// An optimal move for the AI on `board`, ties broken uniformly at
    /// random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when `board` is terminal.
    pub fn best_action(&mut self, board: &Board) -> Result<Coord> {
        self.rules.best_action(board, &mut self.rng)
    }

    /// Compute an optimal move and write the AI's mark into that cell.
    ///
    /// Returns the chosen coordinate so the caller can report it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when `board` is terminal.
    pub fn make_move(&mut self, board: &mut Board) -> Result<Coord> {
        let coord = self.best_action(board)?;
        board.set(coord.x, coord.y, self.rules.ai_player().to_cell());
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(ai: Player) -> AiRules {
        AiRules::new(ai, ai.opponent()).unwrap()
    }

    #[test]
    fn test_rejects_matched_players() {
        let result = AiRules::new(Player::X, Player::X);
        assert!(matches!(
            result,
            Err(Error::MatchedPlayers { player: Player::X })
        ));
        assert!(AiStrategy::new(Player::O, Player::O).is_err());
    }

    #[test]
    fn test_no_actions_on_won_board() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        assert!(rules(Player::O).possible_actions(&board).is_empty());
    }

    #[test]
    fn test_actions_are_free_cells_while_ongoing() {
        let board = Board::from_string("XO. .X. ...").unwrap();
        let actions = rules(Player::O).possible_actions(&board);
        assert_eq!(actions.len(), 6);
        assert!(!actions.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_winning_move_has_singleton_outcome() {
        // O completes the top row; no opponent reply is modelled
        let board = Board::from_string("OO. XX. ...").unwrap();
        let outcomes = rules(Player::O).possible_outcomes(&board, &Coord::new(2, 0));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status(), Status::Won(Player::O));
    }

    #[test]
    fn test_outcomes_enumerate_opponent_replies() {
        let board = Board::from_string("XO. .X. ...").unwrap();
        let outcomes = rules(Player::X).possible_outcomes(&board, &Coord::new(0, 2));
        // Five cells remain free after the AI's move
        assert_eq!(outcomes.len(), 5);
        for outcome in &outcomes {
            assert_eq!(outcome.mark_count(Player::X), 3);
            assert_eq!(outcome.mark_count(Player::O), 2);
        }
    }

    #[test]
    fn test_base_state_value() {
        let rules = rules(Player::O);
        let won = Board::from_string("XX. OOO X..").unwrap();
        assert_eq!(rules.base_state_value(&won), Score::Win);

        let lost = Board::from_string("XXX OO. ...").unwrap();
        assert_eq!(rules.base_state_value(&lost), Score::Loss);

        let drawn = Board::from_string("XOX XXO OXO").unwrap();
        assert_eq!(rules.base_state_value(&drawn), Score::Draw);
    }

    #[test]
    #[should_panic(expected = "ongoing board")]
    fn test_base_state_value_panics_on_ongoing_board() {
        let board = Board::from_string("XO. .X. ...").unwrap();
        rules(Player::O).base_state_value(&board);
    }

    #[test]
    fn test_make_move_takes_the_win() {
        let board = Board::from_string("OO. XX. ...").unwrap();
        let mut strategy = AiStrategy::new(Player::O, Player::X).unwrap().with_seed(7);

        let mut played = board;
        let coord = strategy.make_move(&mut played).unwrap();

        assert_eq!(coord, Coord::new(2, 0));
        assert_eq!(played.status(), Status::Won(Player::O));
    }

    #[test]
    fn test_make_move_blocks_immediate_threat() {
        // X threatens the top row; O has no win of its own
        let board = Board::from_string("XX. .O. ...").unwrap();
        let mut strategy = AiStrategy::new(Player::O, Player::X).unwrap().with_seed(7);

        let mut played = board;
        let coord = strategy.make_move(&mut played).unwrap();

        assert_eq!(coord, Coord::new(2, 0), "only the block avoids the loss");
    }

    #[test]
    fn test_make_move_refuses_terminal_board() {
        let mut board = Board::from_string("XXX OO. ...").unwrap();
        let mut strategy = AiStrategy::new(Player::O, Player::X).unwrap();
        assert!(matches!(strategy.make_move(&mut board), Err(Error::GameOver)));
    }

    #[test]
    fn test_score_ordering() {
        assert!(Score::Loss < Score::Draw);
        assert!(Score::Draw < Score::Win);
    }
}
