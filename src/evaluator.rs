//! Answer evaluation for single-choice and multi-select questions.

use std::collections::BTreeSet;

use crate::domain::{CorrectAnswer, Question};

/// True iff `selected` is exactly the question's correct answer.
///
/// Multi-select questions require set equality: no partial credit.
pub fn is_correct(question: &Question, selected: &BTreeSet<String>) -> bool {
  match &question.correct {
    CorrectAnswer::Single(id) => selected.len() == 1 && selected.contains(id),
    CorrectAnswer::Multi(_) => {
      let correct = question.correct_set();
      selected.len() == correct.len() && selected.iter().all(|id| correct.contains(id.as_str()))
    }
  }
}

/// Whether the current selection may be locked in.
pub fn can_lock(question: &Question, selected: &BTreeSet<String>) -> bool {
  if question.is_multi() {
    !selected.is_empty()
  } else {
    selected.len() == 1
  }
}
