//! Game state module.
//!
//! - `guess` - Raw input parsing and the `InvalidGuess` error
//! - `secret` - Secret kinds and generation
//! - `evaluator` - Scoring a guess against the secret
//! - `status` - Active/Won/Lost state machine
//! - `game` - A single game: attempts, history, termination
//! - `hint` - Hint range, low-attempt warnings, win rating
//! - `session` - Many games keyed by session, plus finished-game history
//!
//! # Architecture
//!
//! ```text
//! raw input ──▶ SecretSpec::parse_guess ──▶ Guess
//!                                             │
//!                                             ▼
//!                              evaluator::evaluate(guess, secret)
//!                                             │ Feedback
//!                                             ▼
//!        GameState ── status.apply(Guessed { exact, exhausted }) ──▶ Active | Won | Lost
//!            │
//!            └── history: Vec<GuessRecord>
//!
//! SessionManager: session_id ──▶ GameState, finished games ──▶ Vec<GameSummary>
//! ```

pub mod evaluator;
pub mod game;
pub mod guess;
pub mod hint;
pub mod secret;
pub mod session;
pub mod status;

// Re-export commonly used types
pub use evaluator::{compare, evaluate, match_digits, Comparison, Feedback, Mark};
pub use game::{
    ConfigError, GameConfig, GameState, GuessRecord, CODEBREAKER_MAX_ATTEMPTS, CODE_LENGTH,
    GUESS_THE_NUMBER_MAX_ATTEMPTS, NUMBER_MAX, NUMBER_MIN,
};
pub use guess::{Guess, InvalidGuess};
pub use hint::{AttemptWarning, HintRange, WinRating};
pub use secret::{Secret, SecretSpec, MAX_CODE_LENGTH};
pub use session::{GameSummary, SessionError, SessionManager, Stats};
pub use status::{GameStatus, InvalidTransition, StatusEvent};

/// Start a game with a freshly generated secret.
pub fn new_game(max_attempts: u32, secret_spec: SecretSpec) -> Result<GameState, ConfigError> {
    GameState::new(GameConfig::new(max_attempts, secret_spec))
}

/// Submit raw player input to a game.
pub fn submit_guess(state: &mut GameState, raw_input: &str) -> Result<GuessRecord, InvalidGuess> {
    state.submit(raw_input)
}
