//! anti-2048: a 2048 game engine plus a minimax policy that plays to lose.
//!
//! This crate provides:
//! - A value-semantic `Board`/`GameState` pair with pure slide/merge
//!   transitions, random tile spawning, and loss detection (`engine` module)
//! - A depth-bounded alpha-beta minimax that chooses the move judged most
//!   likely to end the game soonest, in single-threaded and parallel-root
//!   variants (`minimax` module)
//! - A pluggable move-chooser capability (`policy` module)
//! - Per-tile displacement derivation for presentation layers (`anim` module)
//! - A parallel batch harness that records move counts per game
//!   (`experiment` module)
//!
//! Quick start:
//! ```
//! use anti_2048::engine::GameState;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game setup with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = GameState::new(&mut rng);
//! assert_eq!(state.board().count_empty(), 14);
//! assert!(!state.is_lost());
//! ```
//!
//! Full loop (simplest possible):
//! ```
//! use anti_2048::engine::GameState;
//! use anti_2048::minimax::{Minimax, SearchConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut policy = Minimax::with_config(SearchConfig { max_depth: 2, ..Default::default() });
//! let mut state = GameState::new(&mut rng);
//! let mut moves = 0;
//!
//! // Play a few moves to demonstrate the flow (keep doctests fast)
//! while !state.is_lost() && moves < 4 {
//!     match policy.best_move(*state.board()) {
//!         Some(dir) => {
//!             state = state.apply_move_and_spawn(dir, &mut rng);
//!             moves += 1;
//!         }
//!         None => break,
//!     }
//! }
//! assert!(moves > 0);
//! assert_eq!(state.moves_made(), moves);
//! ```

pub mod anim;
pub mod engine;
pub mod experiment;
pub mod minimax;
pub mod policy;
