//! Session management.
//!
//! Each session owns at most one live [`GameState`]. Finished games are
//! archived as [`GameSummary`] records so a player's results outlive the game
//! that produced them. History is kept in memory only.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::game::{ConfigError, GameConfig, GameState, GuessRecord};
use super::guess::InvalidGuess;
use super::secret::Secret;
use super::status::GameStatus;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub session_id: String,
    pub config: GameConfig,
    pub outcome: GameStatus,
    pub attempts_used: u32,
    pub secret: Secret,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSummary {
    fn from_game(session_id: &str, game: &GameState) -> Option<Self> {
        let secret = game.revealed_secret()?.clone();
        Some(Self {
            session_id: session_id.to_string(),
            config: *game.config(),
            outcome: game.status(),
            attempts_used: game.attempts_used(),
            secret,
            started_at: game.created_at,
            ended_at: game.ended_at,
        })
    }

    pub fn is_win(&self) -> bool {
        self.outcome == GameStatus::Won
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "session_id": self.session_id,
            "mode": self.config.secret.as_str(),
            "outcome": self.outcome.as_str(),
            "attempts_used": self.attempts_used,
            "max_attempts": self.config.max_attempts,
            "secret": self.secret.to_json(),
            "started_at": self.started_at.to_rfc3339(),
            "ended_at": self.ended_at.map(|t| t.to_rfc3339())
        })
    }
}

/// Aggregate results over a set of finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    /// Fewest attempts in any win
    pub best: Option<u32>,
}

impl Stats {
    pub fn from_summaries<'a>(summaries: impl IntoIterator<Item = &'a GameSummary>) -> Self {
        summaries.into_iter().fold(Self::default(), |mut stats, s| {
            stats.played += 1;
            if s.is_win() {
                stats.won += 1;
                stats.best = Some(stats.best.map_or(s.attempts_used, |b| b.min(s.attempts_used)));
            } else {
                stats.lost += 1;
            }
            stats
        })
    }

    /// Share of games won, 0.0 when nothing has been played.
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.played)
        }
    }
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotFound,
    AlreadyPlaying,
    Config(ConfigError),
    Guess(InvalidGuess),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "No game for this session"),
            Self::AlreadyPlaying => write!(f, "Session already has a game in progress"),
            Self::Config(e) => write!(f, "{}", e),
            Self::Guess(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InvalidGuess> for SessionError {
    fn from(e: InvalidGuess) -> Self {
        Self::Guess(e)
    }
}

/// Session manager - one game per session plus finished-game history.
#[derive(Debug, Default)]
pub struct SessionManager {
    games: HashMap<String, GameState>,
    /// Finished games, oldest first
    history: Vec<GameSummary>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game for a session.
    ///
    /// Fails if the session is mid-game. A finished game is replaced.
    pub fn start(
        &mut self,
        session_id: &str,
        config: GameConfig,
    ) -> Result<&mut GameState, SessionError> {
        self.ensure_idle(session_id)?;
        let game = GameState::new(config)?;
        self.insert(session_id, game)
    }

    /// Start a game for a session with a known secret.
    pub fn start_with_secret(
        &mut self,
        session_id: &str,
        config: GameConfig,
        secret: Secret,
    ) -> Result<&mut GameState, SessionError> {
        self.ensure_idle(session_id)?;
        let game = GameState::with_secret(config, secret)?;
        self.insert(session_id, game)
    }

    fn ensure_idle(&self, session_id: &str) -> Result<(), SessionError> {
        if self.games.get(session_id).is_some_and(|g| g.status().is_active()) {
            return Err(SessionError::AlreadyPlaying);
        }
        Ok(())
    }

    fn insert(
        &mut self,
        session_id: &str,
        game: GameState,
    ) -> Result<&mut GameState, SessionError> {
        info!(session_id, "Session game started");
        self.games.insert(session_id.to_string(), game);
        self.games.get_mut(session_id).ok_or(SessionError::NotFound)
    }

    /// Get a session's game.
    pub fn get(&self, session_id: &str) -> Option<&GameState> {
        self.games.get(session_id)
    }

    /// Submit raw input to a session's game, archiving it if the guess ends it.
    pub fn submit(&mut self, session_id: &str, raw: &str) -> Result<GuessRecord, SessionError> {
        let game = self.games.get_mut(session_id).ok_or(SessionError::NotFound)?;

        let record = game.submit(raw)?;

        if let Some(summary) = GameSummary::from_game(session_id, game) {
            info!(
                session_id,
                outcome = summary.outcome.as_str(),
                attempts = summary.attempts_used,
                "Session game archived"
            );
            self.history.push(summary);
        }

        Ok(record)
    }

    /// Replace a session's game with a fresh one using the same config.
    pub fn reset(&mut self, session_id: &str) -> Result<&GameState, SessionError> {
        let game = self.games.get_mut(session_id).ok_or(SessionError::NotFound)?;
        Ok(game.reset())
    }

    /// Remove a session.
    pub fn remove(&mut self, session_id: &str) -> Option<GameState> {
        self.games.remove(session_id)
    }

    /// Drop sessions whose game has ended. Their results stay in history.
    pub fn cleanup_finished(&mut self) -> Vec<String> {
        let finished: Vec<String> = self
            .games
            .iter()
            .filter(|(_, g)| g.status().is_terminal())
            .map(|(id, _)| id.clone())
            .collect();

        for id in &finished {
            self.games.remove(id);
        }

        finished
    }

    /// Count sessions with a game in progress.
    pub fn active_count(&self) -> usize {
        self.games.values().filter(|g| g.status().is_active()).count()
    }

    /// Total session count.
    pub fn count(&self) -> usize {
        self.games.len()
    }

    /// All finished games, oldest first.
    pub fn history(&self) -> &[GameSummary] {
        &self.history
    }

    pub fn history_for<'a>(
        &'a self,
        session_id: &'a str,
    ) -> impl Iterator<Item = &'a GameSummary> {
        self.history.iter().filter(move |s| s.session_id == session_id)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_summaries(&self.history)
    }

    pub fn stats_for(&self, session_id: &str) -> Stats {
        Stats::from_summaries(self.history_for(session_id))
    }

    pub fn history_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.history.iter().map(|s| s.to_json()).collect())
    }
}
