//! Generic minimax search
//!
//! The search is parametrised over a state type, an action type, and a
//! totally ordered value type. Implementors describe a game through three
//! capabilities; the provided combinators define the value recurrences and
//! optimal action selection.

use rand::{Rng, prelude::IndexedRandom};

use crate::error::{Error, Result};

/// Adversarial search where the implementor maximises a value and the
/// opponent is assumed to minimise it.
///
/// An implementation supplies:
///
/// - [`possible_actions`](Minimax::possible_actions): the moves available
///   to the maximiser, empty at terminal states
/// - [`possible_outcomes`](Minimax::possible_outcomes): the states that may
///   follow an action, including the minimiser's reply
/// - [`base_state_value`](Minimax::base_state_value): the value of a
///   terminal state from the maximiser's viewpoint
///
/// The recurrences follow from those three: a state is worth the best of
/// its actions, and an action is worth the worst of its outcomes.
pub trait Minimax {
    type State;
    type Action: Clone;
    type Value: Ord + Copy;

    /// All moves the maximiser may take from `state`.
    ///
    /// Must return an empty collection when `state` is terminal.
    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// All states that may result from taking `action` at `state`,
    /// including the minimiser's response.
    ///
    /// When the maximiser's move itself ends the game, the result is the
    /// singleton of the post-move terminal state. A legal action always
    /// has at least one outcome.
    fn possible_outcomes(&self, state: &Self::State, action: &Self::Action) -> Vec<Self::State>;

    /// The value of a terminal state from the maximiser's viewpoint
    fn base_state_value(&self, state: &Self::State) -> Self::Value;

    /// The value of a state: the maximum action value over all possible
    /// actions, or the base value when no actions exist.
    fn state_value(&self, state: &Self::State) -> Self::Value {
        self.possible_actions(state)
            .iter()
            .map(|action| self.action_value(state, action))
            .max()
            .unwrap_or_else(|| self.base_state_value(state))
    }

    /// The value of committing to `action` at `state`: the minimum state
    /// value over all possible outcomes.
    fn action_value(&self, state: &Self::State, action: &Self::Action) -> Self::Value {
        self.possible_outcomes(state, action)
            .iter()
            .map(|outcome| self.state_value(outcome))
            .min()
            .expect("a legal action must produce at least one outcome")
    }

    /// An action whose value equals the maximum action value at `state`.
    ///
    /// Actions are scanned once while a reservoir of the best-seen actions
    /// is maintained: a strictly greater value replaces the reservoir, an
    /// equal value appends, a lesser value is skipped. One element of the
    /// final reservoir is returned uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when `state` admits no actions; callers
    /// must not request a best action for a terminal state.
    fn best_action<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        rng: &mut R,
    ) -> Result<Self::Action> {
        let mut reservoir: Vec<Self::Action> = Vec::new();
        let mut best_value = None;

        for action in self.possible_actions(state) {
            let value = self.action_value(state, &action);
            match best_value {
                Some(best) if value < best => {}
                Some(best) if value == best => reservoir.push(action),
                _ => {
                    best_value = Some(value);
                    reservoir.clear();
                    reservoir.push(action);
                }
            }
        }

        reservoir.choose(rng).cloned().ok_or(Error::GameOver)
    }
}
