//! Lifelines: 50:50, Phone-a-Friend and Ask-the-Audience.
//!
//! Each one inspects the active question and returns a derived artifact.
//! Question data is never mutated; the state machine stores the artifacts
//! and owns the once-per-game bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::Question;
use crate::util::fill_template;

/// Number of wrong options the 50:50 removes.
const FIFTY_FIFTY_HIDES: usize = 2;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Lifeline {
    FiftyFifty,
    PhoneAFriend,
    AskTheAudience,
}

/// Which lifelines have been spent this game.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LifelinesUsed {
    pub fifty_fifty: bool,
    pub phone: bool,
    pub audience: bool,
}

impl LifelinesUsed {
    pub fn is_used(&self, lifeline: Lifeline) -> bool {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty,
            Lifeline::PhoneAFriend => self.phone,
            Lifeline::AskTheAudience => self.audience,
        }
    }

    pub fn mark(&mut self, lifeline: Lifeline) {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty = true,
            Lifeline::PhoneAFriend => self.phone = true,
            Lifeline::AskTheAudience => self.audience = true,
        }
    }
}

/// Pick up to two incorrect option ids to hide.
///
/// With three or more options at least one incorrect option stays visible.
pub fn fifty_fifty<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> BTreeSet<String> {
    let incorrect = question.incorrect_ids();
    let hides = if question.options.len() >= 3 {
        FIFTY_FIFTY_HIDES.min(incorrect.len().saturating_sub(1))
    } else {
        FIFTY_FIFTY_HIDES
    };
    incorrect
        .choose_multiple(rng, hides)
        .map(|id| (*id).to_string())
        .collect()
}

/// Friend's stated confidence, in percent.
pub fn phone_confidence(difficulty: u8) -> u8 {
    95u8.saturating_sub(difficulty.saturating_mul(10)).max(40)
}

/// Hint text naming the correct label, or `multi_answer_phrase` for multi-select.
///
/// `template` may use `{confidence}` and `{answer}`.
pub fn phone_a_friend(question: &Question, template: &str, multi_answer_phrase: &str) -> String {
    let answer = if question.is_multi() {
        multi_answer_phrase.to_string()
    } else {
        question
            .correct
            .ids()
            .first()
            .and_then(|id| question.option(id))
            .map(|o| o.label.clone())
            .unwrap_or_default()
    };
    let confidence = phone_confidence(question.difficulty).to_string();
    fill_template(template, &[("confidence", &confidence), ("answer", &answer)])
}

/// Share of the vote the first correct option receives.
pub fn audience_boost(difficulty: u8) -> u8 {
    80u8.saturating_sub(difficulty.saturating_mul(15)).max(20)
}

/// Percentages per option id, summing to exactly 100.
///
/// The first correct id gets [`audience_boost`]. Every other option but the
/// last draws uniformly from what is still unallocated; the last takes the rest.
pub fn ask_the_audience<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> BTreeMap<String, u8> {
    let mut stats: BTreeMap<String, u8> = question.options.iter().map(|o| (o.id.clone(), 0)).collect();

    let Some(main) = question.correct.ids().first().map(|id| (*id).to_string()) else {
        return stats;
    };
    let boost = audience_boost(question.difficulty);
    stats.insert(main.clone(), boost);
    let mut remaining = 100 - boost;

    let others: Vec<&str> = question
        .options
        .iter()
        .map(|o| o.id.as_str())
        .filter(|id| *id != main)
        .collect();

    for (idx, id) in others.iter().enumerate() {
        let share = if idx + 1 == others.len() {
            remaining
        } else if remaining == 0 {
            0
        } else {
            rng.gen_range(0..remaining)
        };
        stats.insert((*id).to_string(), share);
        remaining -= share;
    }

    // Only reachable with a single-option question, which validation forbids.
    if remaining > 0 {
        if let Some(v) = stats.get_mut(&main) {
            *v += remaining;
        }
    }
    stats
}
