//! Game state management.
//!
//! A [`GameState`] owns one secret, the attempt budget, the guess history and
//! the status. Guesses go in through [`GameState::submit`]; a finished game is
//! replaced wholesale by [`GameState::reset`].

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::evaluator::{self, Feedback};
use super::guess::{Guess, InvalidGuess};
use super::hint::{AttemptWarning, HintRange, WinRating};
use super::secret::{Secret, SecretSpec};
use super::status::{GameStatus, StatusEvent};

/// Digits in a codebreaker secret.
pub const CODE_LENGTH: usize = 4;

/// Attempt budget for codebreaker.
pub const CODEBREAKER_MAX_ATTEMPTS: u32 = 6;

/// Inclusive bounds for guess-the-number.
pub const NUMBER_MIN: u32 = 1;
pub const NUMBER_MAX: u32 = 100;

/// Attempt budget for guess-the-number.
pub const GUESS_THE_NUMBER_MAX_ATTEMPTS: u32 = 5;

/// Settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Guesses allowed before the game is lost.
    pub max_attempts: u32,
    /// What kind of secret to hide.
    pub secret: SecretSpec,
}

impl GameConfig {
    pub fn new(max_attempts: u32, secret: SecretSpec) -> Self {
        Self {
            max_attempts,
            secret,
        }
    }

    /// Four-digit code, six attempts.
    pub fn codebreaker() -> Self {
        Self::new(CODEBREAKER_MAX_ATTEMPTS, SecretSpec::code(CODE_LENGTH))
    }

    /// Number in 1-100, five attempts.
    pub fn guess_the_number() -> Self {
        Self::new(
            GUESS_THE_NUMBER_MAX_ATTEMPTS,
            SecretSpec::number(NUMBER_MIN, NUMBER_MAX),
        )
    }

    /// Load and validate a config from JSON.
    ///
    /// ```rust
    /// use guess_state::GameConfig;
    ///
    /// let config = GameConfig::from_json(
    ///     r#"{"max_attempts": 8, "secret": {"kind": "code", "length": 5}}"#,
    /// ).unwrap();
    /// assert_eq!(config.max_attempts, 8);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        self.secret.validate()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_attempts": self.max_attempts,
            "secret": self.secret.to_json()
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::guess_the_number()
    }
}

/// Config errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroAttempts,
    EmptyRange { min: u32, max: u32 },
    BadCodeLength { length: usize },
    SecretMismatch,
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAttempts => write!(f, "At least one attempt is required"),
            Self::EmptyRange { min, max } => write!(f, "Empty number range {}-{}", min, max),
            Self::BadCodeLength { length } => write!(f, "Unsupported code length {}", length),
            Self::SecretMismatch => write!(f, "Secret does not fit the game config"),
            Self::Parse(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// 1-based attempt number
    pub attempt: u32,
    pub guess: Guess,
    pub feedback: Feedback,
    pub submitted_at: DateTime<Utc>,
}

impl GuessRecord {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "attempt": self.attempt,
            "guess": self.guess.to_json(),
            "feedback": self.feedback.to_json(),
            "exact": self.feedback.is_exact()
        })
    }
}

/// State of a single game.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,

    secret: Secret,

    attempts_used: u32,

    status: GameStatus,

    /// Oldest first
    history: Vec<GuessRecord>,

    /// Only tracked for numeric secrets
    hint_range: Option<HintRange>,

    /// When this game was created
    pub created_at: DateTime<Utc>,

    /// When the game reached Won or Lost
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameState {
    /// Start a game with a secret drawn from the thread RNG.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Start a game with a secret drawn from `rng`.
    pub fn with_rng<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = config.secret.generate(rng);
        Ok(Self::start(config, secret))
    }

    /// Start a game with a known secret.
    pub fn with_secret(config: GameConfig, secret: Secret) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.secret.fits(&secret) {
            return Err(ConfigError::SecretMismatch);
        }
        Ok(Self::start(config, secret))
    }

    fn start(config: GameConfig, secret: Secret) -> Self {
        info!(
            mode = config.secret.as_str(),
            max_attempts = config.max_attempts,
            "Game started"
        );

        let hint_range = match config.secret {
            SecretSpec::Number { min, max } => Some(HintRange::new(min, max)),
            SecretSpec::Code { .. } => None,
        };

        Self {
            config,
            secret,
            attempts_used: 0,
            status: GameStatus::Active,
            history: Vec::new(),
            hint_range,
            created_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Submit raw player input.
    ///
    /// Nothing changes on error: no attempt is used and no record is kept.
    #[instrument(skip(self))]
    pub fn submit(&mut self, raw: &str) -> Result<GuessRecord, InvalidGuess> {
        self.ensure_active()?;
        let guess = self.config.secret.parse_guess(raw).map_err(|e| {
            debug!(error = %e, "Rejected guess input");
            e
        })?;
        self.submit_guess(guess)
    }

    /// Submit an already-typed guess.
    pub fn submit_guess(&mut self, guess: Guess) -> Result<GuessRecord, InvalidGuess> {
        self.ensure_active()?;
        self.config.secret.check_guess(&guess)?;

        let feedback = evaluator::evaluate(&guess, &self.secret)?;
        let attempt = self.attempts_used + 1;
        let status = self
            .status
            .apply(StatusEvent::Guessed {
                exact: feedback.is_exact(),
                exhausted: attempt >= self.config.max_attempts,
            })
            .map_err(|e| InvalidGuess::GameOver { status: e.from })?;

        self.attempts_used = attempt;
        self.status = status;

        if let (Some(range), (Guess::Number(n), Feedback::Comparison(c))) =
            (self.hint_range, (&guess, &feedback))
        {
            self.hint_range = Some(range.narrow(*n, *c));
        }

        debug!(
            attempt,
            guess = %guess,
            feedback = %feedback.to_json(),
            "Guess scored"
        );

        let record = GuessRecord {
            attempt,
            guess,
            feedback,
            submitted_at: Utc::now(),
        };
        self.history.push(record.clone());

        if status.is_terminal() {
            self.ended_at = Some(record.submitted_at);
            info!(
                status = status.as_str(),
                attempts = attempt,
                secret = %self.secret,
                "Game over"
            );
        }

        Ok(record)
    }

    /// Discard this game and start a fresh one with the same config.
    pub fn reset(&mut self) -> &Self {
        self.reset_with_rng(&mut rand::thread_rng())
    }

    pub fn reset_with_rng<R: Rng>(&mut self, rng: &mut R) -> &Self {
        info!(previous = self.status.as_str(), "Game reset");
        // Reset is accepted from every status.
        let status = self
            .status
            .apply(StatusEvent::Reset)
            .unwrap_or(GameStatus::Active);
        // The config was validated when this game was built.
        let secret = self.config.secret.generate(rng);
        *self = Self::start(self.config, secret);
        self.status = status;
        self
    }

    fn ensure_active(&self) -> Result<(), InvalidGuess> {
        if self.status.is_active() {
            Ok(())
        } else {
            debug!(status = self.status.as_str(), "Guess after game over");
            Err(InvalidGuess::GameOver {
                status: self.status,
            })
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.config.max_attempts - self.attempts_used
    }

    /// Fraction of the attempt budget spent, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        f64::from(self.attempts_used) / f64::from(self.config.max_attempts)
    }

    /// Guesses in the order they were made.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn history_newest_first(&self) -> impl Iterator<Item = &GuessRecord> {
        self.history.iter().rev()
    }

    pub fn last_record(&self) -> Option<&GuessRecord> {
        self.history.last()
    }

    /// The secret, once the game is over.
    pub fn revealed_secret(&self) -> Option<&Secret> {
        if self.status.is_terminal() {
            Some(&self.secret)
        } else {
            None
        }
    }

    pub fn hint_range(&self) -> Option<HintRange> {
        self.hint_range
    }

    /// Warning for the player when few attempts remain.
    pub fn attempt_warning(&self) -> Option<AttemptWarning> {
        if self.status.is_active() && self.attempts_used > 0 {
            AttemptWarning::for_remaining(self.attempts_remaining())
        } else {
            None
        }
    }

    pub fn rating(&self) -> Option<WinRating> {
        match self.status {
            GameStatus::Won => Some(WinRating::for_attempts(self.attempts_used)),
            _ => None,
        }
    }

    /// Snapshot for the view layer. The secret is only included once the game is over.
    pub fn to_json(&self) -> serde_json::Value {
        let history: Vec<serde_json::Value> = self.history.iter().map(|r| r.to_json()).collect();

        serde_json::json!({
            "mode": self.config.secret.as_str(),
            "status": self.status.as_str(),
            "attempts_used": self.attempts_used,
            "attempts_remaining": self.attempts_remaining(),
            "max_attempts": self.config.max_attempts,
            "history": history,
            "hint_range": self.hint_range,
            "warning": self.attempt_warning(),
            "rating": self.rating().map(|r| r.as_str()),
            "secret": self.revealed_secret().map(|s| s.to_json())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::evaluator::{Comparison, Mark};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numeric(secret: u32, max_attempts: u32) -> GameState {
        GameState::with_secret(
            GameConfig::new(max_attempts, SecretSpec::number(1, 100)),
            Secret::Number(secret),
        )
        .unwrap()
    }

    fn code(secret: &[u8]) -> GameState {
        GameState::with_secret(GameConfig::codebreaker(), Secret::Code(secret.to_vec())).unwrap()
    }

    #[test]
    fn test_game_new() {
        let game = GameState::new(GameConfig::codebreaker()).unwrap();
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.attempts_used(), 0);
        assert_eq!(game.attempts_remaining(), CODEBREAKER_MAX_ATTEMPTS);
        assert!(game.history().is_empty());
        assert!(game.revealed_secret().is_none());
        assert!(game.hint_range().is_none());
    }

    #[test]
    fn test_numeric_win() {
        let mut game = numeric(42, 5);

        let feedback: Vec<Comparison> = ["10", "90", "50", "42"]
            .iter()
            .map(|raw| game.submit(raw).unwrap().feedback.as_comparison().unwrap())
            .collect();

        assert_eq!(
            feedback,
            vec![
                Comparison::Lower,
                Comparison::Higher,
                Comparison::Higher,
                Comparison::Equal
            ]
        );
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.attempts_used(), 4);
        assert_eq!(game.revealed_secret(), Some(&Secret::Number(42)));
        assert_eq!(game.rating(), Some(WinRating::Eventually));
        assert!(game.ended_at.is_some());
    }

    #[test]
    fn test_numeric_loss() {
        let mut game = numeric(42, 3);

        game.submit("1").unwrap();
        game.submit("2").unwrap();
        assert_eq!(game.status(), GameStatus::Active);
        game.submit("3").unwrap();

        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.attempts_remaining(), 0);
        assert_eq!(
            game.submit("42"),
            Err(InvalidGuess::GameOver {
                status: GameStatus::Lost
            })
        );
        assert_eq!(game.attempts_used(), 3);
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.rating(), None);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut game = numeric(7, 2);
        game.submit("8").unwrap();
        game.submit("7").unwrap();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_invalid_input_costs_nothing() {
        let mut game = numeric(42, 5);

        for raw in ["", "abc", "0", "101", "-1", "4.2"] {
            assert!(game.submit(raw).is_err(), "{:?} accepted", raw);
        }

        assert_eq!(game.attempts_used(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn test_wrong_kind_guess() {
        let mut game = numeric(42, 5);
        assert_eq!(
            game.submit_guess(Guess::Code(vec![4, 2])),
            Err(InvalidGuess::WrongKind)
        );
        assert_eq!(game.attempts_used(), 0);
    }

    #[test]
    fn test_code_game() {
        let mut game = code(&[1, 1, 2, 3]);

        let record = game.submit("1111").unwrap();
        assert_eq!(record.attempt, 1);
        assert_eq!(
            record.feedback,
            Feedback::Marks(vec![Mark::Correct, Mark::Correct, Mark::Absent, Mark::Absent])
        );

        assert!(matches!(
            game.submit("12"),
            Err(InvalidGuess::WrongLength { .. })
        ));
        assert!(matches!(
            game.submit("1x23"),
            Err(InvalidGuess::NotADigit { found: 'x' })
        ));
        assert_eq!(game.attempts_used(), 1);

        let record = game.submit("1 1 2 3").unwrap();
        assert!(record.feedback.is_exact());
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.rating(), Some(WinRating::Quick));
    }

    #[test]
    fn test_code_loss() {
        let mut game = code(&[9, 9, 9, 9]);
        for _ in 0..CODEBREAKER_MAX_ATTEMPTS {
            game.submit("0000").unwrap();
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(
            game.revealed_secret(),
            Some(&Secret::Code(vec![9, 9, 9, 9]))
        );
    }

    #[test]
    fn test_attempts_monotonic() {
        let mut game = numeric(50, 4);
        let mut last = 0;

        for raw in ["10", "oops", "20", "", "30", "40", "50", "60"] {
            let _ = game.submit(raw);
            assert!(game.attempts_used() >= last);
            assert!(game.attempts_used() <= game.max_attempts());
            last = game.attempts_used();
        }

        assert_eq!(game.attempts_used(), 4);
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn test_hint_range_and_warning() {
        let mut game = numeric(42, 5);
        assert_eq!(game.hint_range(), Some(HintRange::new(1, 100)));
        assert_eq!(game.attempt_warning(), None);

        game.submit("10").unwrap();
        game.submit("90").unwrap();
        assert_eq!(game.hint_range(), Some(HintRange::new(11, 89)));
        assert_eq!(game.attempt_warning(), None);

        game.submit("50").unwrap();
        assert_eq!(game.attempt_warning(), Some(AttemptWarning::LowAttempts(2)));

        game.submit("30").unwrap();
        assert_eq!(game.attempt_warning(), Some(AttemptWarning::LastChance));
        assert_eq!(game.hint_range(), Some(HintRange::new(31, 49)));
    }

    #[test]
    fn test_history_order() {
        let mut game = numeric(42, 5);
        game.submit("10").unwrap();
        game.submit("20").unwrap();

        let oldest: Vec<u32> = game.history().iter().map(|r| r.attempt).collect();
        let newest: Vec<u32> = game.history_newest_first().map(|r| r.attempt).collect();
        assert_eq!(oldest, vec![1, 2]);
        assert_eq!(newest, vec![2, 1]);
        assert_eq!(game.last_record().map(|r| r.guess.clone()), Some(Guess::Number(20)));
    }

    #[test]
    fn test_reset() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = numeric(42, 2);
        game.submit("1").unwrap();
        game.submit("2").unwrap();
        assert_eq!(game.status(), GameStatus::Lost);

        game.reset_with_rng(&mut rng);

        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.attempts_used(), 0);
        assert!(game.history().is_empty());
        assert!(game.ended_at.is_none());
        assert_eq!(game.hint_range(), Some(HintRange::new(1, 100)));
        assert!(game.submit("50").is_ok());
    }

    #[test]
    fn test_reset_after_win() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = code(&[4, 4, 4, 4]);
        game.submit("4444").unwrap();
        assert_eq!(game.status(), GameStatus::Won);

        game.reset_with_rng(&mut rng);

        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.rating(), None);
        assert!(game.revealed_secret().is_none());
        assert_eq!(game.attempts_remaining(), CODEBREAKER_MAX_ATTEMPTS);
    }

    #[test]
    fn test_progress() {
        let mut game = numeric(42, 4);
        assert_eq!(game.progress(), 0.0);
        game.submit("1").unwrap();
        assert_eq!(game.progress(), 0.25);
    }

    #[test]
    fn test_with_secret_mismatch() {
        assert_eq!(
            GameState::with_secret(GameConfig::codebreaker(), Secret::Number(3)).err(),
            Some(ConfigError::SecretMismatch)
        );
        assert_eq!(
            GameState::with_secret(GameConfig::guess_the_number(), Secret::Number(101)).err(),
            Some(ConfigError::SecretMismatch)
        );
    }

    #[test]
    fn test_config() {
        assert_eq!(GameConfig::default(), GameConfig::guess_the_number());
        assert_eq!(
            GameConfig::new(0, SecretSpec::code(4)).validate(),
            Err(ConfigError::ZeroAttempts)
        );
        assert!(GameState::new(GameConfig::new(0, SecretSpec::code(4))).is_err());

        let config = GameConfig::from_json(
            r#"{"max_attempts": 5, "secret": {"kind": "number", "min": 1, "max": 100}}"#,
        )
        .unwrap();
        assert_eq!(config, GameConfig::guess_the_number());

        assert!(matches!(
            GameConfig::from_json(r#"{"max_attempts": 5}"#),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            GameConfig::from_json(r#"{"max_attempts": 3, "secret": {"kind": "code", "length": 0}}"#),
            Err(ConfigError::BadCodeLength { length: 0 })
        );
    }

    #[test]
    fn test_to_json_hides_secret() {
        let mut game = numeric(42, 5);
        game.submit("10").unwrap();

        let json = game.to_json();
        assert_eq!(json["status"], "active");
        assert_eq!(json["attempts_remaining"], 4);
        assert_eq!(json["history"][0]["feedback"], "lower");
        assert!(json["secret"].is_null());

        game.submit("42").unwrap();
        let json = game.to_json();
        assert_eq!(json["status"], "won");
        assert_eq!(json["secret"], 42);
        assert_eq!(json["rating"], "quick");
    }
}
