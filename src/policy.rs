//! The move-chooser capability.
//!
//! A game loop depends only on [`Policy`]. Which chooser is behind it
//! (uniform random, the minimax search, or an externally supplied function)
//! is invisible to the loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{GameState, Move};
use crate::minimax::{Minimax, MinimaxParallel};

/// Maps a game state to the next direction to play.
///
/// Returns `None` exactly when no legal move exists. Implementations may keep
/// internal state (an RNG, search statistics) but must not mutate the game.
pub trait Policy {
    fn choose(&mut self, state: &GameState) -> Option<Move>;
}

/// Any `FnMut(&GameState) -> Option<Move>` is a policy; this is the hook for
/// move-choosers trained or implemented elsewhere.
impl<F> Policy for F
where
    F: FnMut(&GameState) -> Option<Move>,
{
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        self(state)
    }
}

/// Uniform-random choice among the legal moves.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rng.gen_range(0..moves.len())])
        }
    }
}

impl Policy for Minimax {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        self.best_move(*state.board())
    }
}

impl Policy for MinimaxParallel {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        self.best_move(*state.board())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;

    fn seeded_state(seed: u64) -> GameState {
        let mut rng = StdRng::seed_from_u64(seed);
        GameState::new(&mut rng)
    }

    #[test]
    fn random_policy_returns_a_legal_move() {
        let state = seeded_state(1);
        let mut policy = RandomPolicy::from_seed(2);
        for _ in 0..20 {
            let dir = policy.choose(&state).unwrap();
            assert!(state.legal_moves().contains(&dir));
        }
    }

    #[test]
    fn policies_report_terminal_states() {
        let lost = Board::from_cells([2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2]);
        let state = GameState::from_board(lost);
        assert!(state.is_lost());
        assert_eq!(RandomPolicy::from_seed(3).choose(&state), None);
        assert_eq!(Minimax::new().choose(&state), None);
        assert_eq!(MinimaxParallel::new().choose(&state), None);
    }

    #[test]
    fn closure_acts_as_policy() {
        let state = seeded_state(5);
        let mut fixed = |s: &GameState| s.legal_moves().first().copied();
        assert_eq!(fixed.choose(&state), state.legal_moves().first().copied());
    }

    #[test]
    fn search_policies_agree_with_their_search() {
        let state = seeded_state(8);
        let mut search = Minimax::new();
        let expected = search.best_move(*state.board());
        let mut policy = Minimax::new();
        assert_eq!(policy.choose(&state), expected);
    }
}
