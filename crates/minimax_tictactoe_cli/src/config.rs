//! Console configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use minimax_tictactoe::{Participant, Seating, Side};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for an interactive console session.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// human = "o"
/// opener = "computer"
/// auto_reset = true
/// show_scores = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Side the human plays.
    human: Side,

    /// Who places the first mark of each round.
    opener: Participant,

    /// Start a new round as soon as one finishes.
    auto_reset: bool,

    /// Print the move scores after every computer move.
    show_scores: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            human: Side::First,
            opener: Participant::Human,
            auto_reset: false,
            show_scores: false,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human = %config.human, opener = ?config.opener, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Applies command-line overrides. Flags only ever switch options on.
    pub fn with_overrides(mut self, human: Option<Side>, computer_first: bool, auto_reset: bool) -> Self {
        if let Some(human) = human {
            self.human = human;
        }
        if computer_first {
            self.opener = Participant::Computer;
        }
        self.auto_reset |= auto_reset;
        self
    }

    /// Seating for the engine.
    pub fn seating(&self) -> Seating {
        Seating {
            human: self.human,
            opener: self.opener,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
