//! Game engine logic and state management.
//!
//! This module composes the core data structures into the playable game:
//!
//! - [`SeededRng`] / [`GameSeed`] - Deterministic random source and the seed string that fixes it
//! - [`ShapeCatalog`] - Weighted shape templates drawn through the generator
//! - [`GameState`] - Turn controller holding the board, current and next shapes
//! - [`GameStats`] - Score, turn and line statistics
//!
//! # Game Flow
//!
//! A turn is split into four separately callable steps so a front end can
//! pause between them:
//!
//! 1. [`GameState::place_shape`] commits the current shape at an anchor
//! 2. [`GameState::find_lines_to_clear`] reports the full rows and columns
//! 3. [`GameState::clear_lines`] empties them and adds the points
//! 4. [`GameState::next_turn`] promotes the next shape and checks for game over
//!
//! # Example
//!
//! ```
//! use shape_sorter_engine::GameState;
//!
//! let mut state = GameState::with_seed("abc".parse().unwrap());
//!
//! let (x, y) = state.valid_anchors().next().unwrap();
//! assert!(state.place_shape(x, y));
//!
//! let lines = state.find_lines_to_clear();
//! state.clear_lines(&lines);
//! state.next_turn();
//!
//! if state.is_game_over() {
//!     println!("Game over!");
//! }
//! ```

pub use self::{catalog::*, game_state::*, game_stats::*, rng::*};

mod catalog;
mod game_state;
mod game_stats;
mod rng;
