//! Session builder: stratified sampling of fifteen questions from the bank.
//!
//! The bank is partitioned into the three tiers, each pool is shuffled
//! independently and the first five of each are concatenated in tier order.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::{Question, Tier};
use crate::error::GameError;
use crate::ladder::LADDER_SIZE;

pub const QUESTIONS_PER_TIER: usize = LADDER_SIZE / Tier::ALL.len();

/// The ordered questions of one play-through.
#[derive(Clone, Debug)]
pub struct Session {
    questions: Vec<Question>,
}

impl Session {
    /// Sample a fresh session from `bank`.
    ///
    /// # Errors
    ///
    /// [`GameError::InsufficientQuestions`] if any tier has fewer than five questions.
    pub fn build<R: Rng + ?Sized>(bank: &[Question], rng: &mut R) -> Result<Self, GameError> {
        let mut questions = Vec::with_capacity(LADDER_SIZE);

        for tier in Tier::ALL {
            let mut pool: Vec<&Question> = bank.iter().filter(|q| q.tier() == Some(tier)).collect();
            if pool.len() < QUESTIONS_PER_TIER {
                return Err(GameError::InsufficientQuestions {
                    tier,
                    available: pool.len(),
                    required: QUESTIONS_PER_TIER,
                });
            }
            pool.shuffle(rng);
            debug!(target: "game", %tier, pool = pool.len(), "Sampled tier");
            questions.extend(pool.into_iter().take(QUESTIONS_PER_TIER).cloned());
        }

        Ok(Self { questions })
    }

    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
