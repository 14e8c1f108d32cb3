use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The pauses between the steps of a game, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    /// How long two non-matching cards stay face up.
    pub reveal_ms: u64,
    /// Pause after a comparison before the next turn starts.
    pub between_turns_ms: u64,
    /// The computer waits a uniformly random time in this range before each flip.
    pub think_min_ms: u64,
    pub think_max_ms: u64,
    /// How long the end-of-game status stays visible.
    pub end_game_status_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            reveal_ms: 1000,
            between_turns_ms: 500,
            think_min_ms: 301,
            think_max_ms: 550,
            end_game_status_ms: 1500,
        }
    }
}

impl Delays {
    /// No pauses at all, for simulations.
    pub fn instant() -> Self {
        Self {
            reveal_ms: 0,
            between_turns_ms: 0,
            think_min_ms: 0,
            think_max_ms: 0,
            end_game_status_ms: 0,
        }
    }

    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    pub fn between_turns(&self) -> Duration {
        Duration::from_millis(self.between_turns_ms)
    }

    pub fn end_game_status(&self) -> Duration {
        Duration::from_millis(self.end_game_status_ms)
    }

    pub fn think<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.think_max_ms <= self.think_min_ms {
            return Duration::from_millis(self.think_min_ms);
        }
        Duration::from_millis(rng.gen_range(self.think_min_ms..=self.think_max_ms))
    }
}

/// Settings for an [`Engine`](crate::Engine).
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether the human takes the first turn of every game.
    pub human_starts: bool,
    /// Turning this off deals the cards in deck order, which makes games reproducible by hand.
    pub shuffle: bool,
    pub delays: Delays,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            human_starts: true,
            shuffle: true,
            delays: Delays::default(),
        }
    }
}
