//! Loading game configuration (timing, countdown policy, hint script, bank path) from TOML.
//!
//! See `GameConfig` for the expected schema. Every field has a default, so an
//! empty file (or no file at all) yields the standard show rules.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Tier;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  /// Path to a TOML question bank. The embedded bank is used when absent.
  #[serde(default)]
  pub question_bank: Option<String>,
  /// Base seed for reproducible games; entropy when absent.
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub timing: Timing,
  #[serde(default)]
  pub timer: TimerPolicy,
  #[serde(default)]
  pub script: Script,
}

/// Dramatic pauses between automatic phase changes.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Timing {
  /// locked -> revealed
  pub tension_delay_ms: u64,
  /// revealed -> feedback
  pub reveal_delay_ms: u64,
}

impl Default for Timing {
  fn default() -> Self {
    Self { tension_delay_ms: 2_000, reveal_delay_ms: 3_000 }
  }
}

impl Timing {
  pub fn tension_delay(&self) -> Duration {
    Duration::from_millis(self.tension_delay_ms)
  }

  pub fn reveal_delay(&self) -> Duration {
    Duration::from_millis(self.reveal_delay_ms)
  }
}

/// Per-question countdown budget.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimerPolicy {
  /// Same budget for every question.
  Flat { seconds: u32 },
  /// Budget scaled by the question's tier.
  ByDifficulty { easy: u32, medium: u32, hard: u32 },
}

impl Default for TimerPolicy {
  fn default() -> Self {
    TimerPolicy::Flat { seconds: 120 }
  }
}

impl TimerPolicy {
  pub fn seconds_for(&self, difficulty: u8) -> u32 {
    match *self {
      TimerPolicy::Flat { seconds } => seconds,
      TimerPolicy::ByDifficulty { easy, medium, hard } => match Tier::of_difficulty(difficulty) {
        Some(Tier::Foundation) => easy,
        Some(Tier::Associate) => medium,
        Some(Tier::Professional) | None => hard,
      },
    }
  }
}

/// Text used by the Phone-a-Friend lifeline.
/// `{confidence}` and `{answer}` are substituted in the template.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Script {
  pub phone_hint_template: String,
  pub multi_answer_phrase: String,
}

impl Default for Script {
  fn default() -> Self {
    Self {
      phone_hint_template: "I'm {confidence}% sure the answer is {answer}.".into(),
      multi_answer_phrase: "the multiple correct options".into(),
    }
  }
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GameConfig>(&s) {
      Ok(cfg) => {
        info!(target: "millionaire_backend", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "millionaire_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "millionaire_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
