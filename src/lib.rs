//! Guess State Library
//!
//! This crate provides the game logic behind number-guessing and code-breaking
//! games.
//!
//! # Overview
//!
//! - **Guess Evaluation** - Higher/lower comparison for a numeric secret, and
//!   per-digit correct/present/absent marks for a digit code, with duplicate
//!   digits counted at most once.
//!
//! - **Attempt State Machine** - A fixed attempt budget per game, with
//!   validated `Active -> Won` / `Active -> Lost` transitions.
//!
//! - **Sessions** - Independent games keyed by session, with finished-game
//!   history and stats.
//!
//! # Design Principles
//!
//! 1. **Explicit state** - Every game is a value owned by its caller. There are
//!    no globals.
//!
//! 2. **Bad input is free** - A rejected guess never uses an attempt.
//!
//! 3. **No presentation** - This crate is pure state, no rendering or timers.
//!
//! 4. **Serialization-ready** - Snapshots convert to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use guess_state::{Comparison, GameConfig, GameState, GameStatus, Secret};
//!
//! let mut game = GameState::with_secret(GameConfig::guess_the_number(), Secret::Number(42))
//!     .unwrap();
//!
//! let record = game.submit("10").unwrap();
//! assert_eq!(record.feedback.as_comparison(), Some(Comparison::Lower));
//!
//! game.submit("42").unwrap();
//! assert_eq!(game.status(), GameStatus::Won);
//! assert_eq!(game.revealed_secret(), Some(&Secret::Number(42)));
//!
//! // Guesses after the game ends are rejected.
//! assert!(game.submit("42").is_err());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
