//! Domain models used by the engine: options, correct-answer specs, questions and tiers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::BankLoadError;

/// Bounds on the number of options a question may carry.
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// One selectable answer of a question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
  pub id: String,   // short token, "a".."f"
  #[serde(default)]
  pub label: String,
  pub text: String,
}

/// Which option ids are correct.
///
/// In TOML this is either `correct = "c"` or `correct = ["b", "d"]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CorrectAnswer {
  Single(String),
  Multi(Vec<String>),
}

impl CorrectAnswer {
  pub fn ids(&self) -> Vec<&str> {
    match self {
      CorrectAnswer::Single(id) => vec![id.as_str()],
      CorrectAnswer::Multi(ids) => ids.iter().map(String::as_str).collect(),
    }
  }

  pub fn contains(&self, id: &str) -> bool {
    match self {
      CorrectAnswer::Single(c) => c == id,
      CorrectAnswer::Multi(ids) => ids.iter().any(|c| c == id),
    }
  }
}

/// Difficulty tiers used to stratify a session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  /// Difficulty 1, positions 1-5.
  Foundation,
  /// Difficulty 2 or 3, positions 6-10.
  Associate,
  /// Difficulty 4 or 5, positions 11-15.
  Professional,
}

impl Tier {
  pub const ALL: [Tier; 3] = [Tier::Foundation, Tier::Associate, Tier::Professional];

  pub fn of_difficulty(difficulty: u8) -> Option<Tier> {
    match difficulty {
      1 => Some(Tier::Foundation),
      2 | 3 => Some(Tier::Associate),
      4 | 5 => Some(Tier::Professional),
      _ => None,
    }
  }
}

impl std::fmt::Display for Tier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Tier::Foundation => "foundation (difficulty 1)",
      Tier::Associate => "associate (difficulty 2-3)",
      Tier::Professional => "professional (difficulty 4-5)",
    };
    f.write_str(s)
  }
}

/// A quiz question. Immutable once it leaves the bank adapter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub id: String,
  pub text: String,
  pub options: Vec<AnswerOption>,
  pub correct: CorrectAnswer,
  pub difficulty: u8,   // 1..=5
  pub domain: String,
  #[serde(default)]
  pub explanation: String,
}

impl Question {
  pub fn is_multi(&self) -> bool {
    matches!(self.correct, CorrectAnswer::Multi(_))
  }

  pub fn tier(&self) -> Option<Tier> {
    Tier::of_difficulty(self.difficulty)
  }

  pub fn option(&self, id: &str) -> Option<&AnswerOption> {
    self.options.iter().find(|o| o.id == id)
  }

  pub fn has_option(&self, id: &str) -> bool {
    self.option(id).is_some()
  }

  pub fn is_correct_id(&self, id: &str) -> bool {
    self.correct.contains(id)
  }

  /// Correct ids in a set, for comparisons that ignore order.
  pub fn correct_set(&self) -> BTreeSet<&str> {
    self.correct.ids().into_iter().collect()
  }

  /// Ids of the options that are not correct, in option order.
  pub fn incorrect_ids(&self) -> Vec<&str> {
    self.options
      .iter()
      .filter(|o| !self.is_correct_id(&o.id))
      .map(|o| o.id.as_str())
      .collect()
  }

  /// Fill in defaults the bank format allows to omit (labels).
  pub fn normalized(mut self) -> Self {
    for opt in &mut self.options {
      if opt.label.is_empty() {
        opt.label = opt.id.to_uppercase();
      }
    }
    self
  }

  /// Check the structural invariants every question must satisfy.
  pub fn validate(&self) -> Result<(), BankLoadError> {
    let invalid = |reason: String| BankLoadError::InvalidQuestion { id: self.id.clone(), reason };

    if self.id.trim().is_empty() {
      return Err(invalid("empty id".into()));
    }
    if self.tier().is_none() {
      return Err(invalid(format!("difficulty {} outside 1..=5", self.difficulty)));
    }
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options.len()) {
      return Err(invalid(format!(
        "{} options (expected {MIN_OPTIONS}..={MAX_OPTIONS})",
        self.options.len()
      )));
    }

    let mut seen = BTreeSet::new();
    for opt in &self.options {
      if !seen.insert(opt.id.as_str()) {
        return Err(invalid(format!("duplicate option id '{}'", opt.id)));
      }
    }

    let ids = self.correct.ids();
    if ids.is_empty() {
      return Err(invalid("empty correct answer set".into()));
    }
    if ids.iter().collect::<BTreeSet<_>>().len() != ids.len() {
      return Err(invalid("duplicate id in correct answer set".into()));
    }
    if let Some(missing) = ids.iter().find(|id| !seen.contains(*id)) {
      return Err(invalid(format!("correct id '{missing}' is not an option")));
    }
    Ok(())
  }
}
