//! The game state machine.
//!
//! `Game` exclusively owns the live session, the phase and every per-game and
//! per-question field. Player actions that are not valid in the current phase,
//! or arrive while paused, are ignored and reported as "not applied" (`false`).
//!
//! Phases:
//!
//! ```text
//! loading -> intro -> playing -> locked -> revealed -> feedback -> playing (next question)
//!                        |                                 |---> won
//!                        '-> lost (walk away / time out)   '---> lost
//! ```
//!
//! `won` and `lost` stay put until `reset` (back to `intro`) or `start`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::Script;
use crate::domain::Question;
use crate::error::GameError;
use crate::evaluator::{can_lock, is_correct};
use crate::ladder::{level_at, top_payout, MoneyLevel, LADDER_SIZE};
use crate::lifelines::{self, Lifeline, LifelinesUsed};
use crate::session::Session;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Intro,
    Loading,
    Playing,
    Locked,
    Revealed,
    Feedback,
    Won,
    Lost,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Everything the presentation layer reads each render.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// 0-based index into the session.
    pub position: usize,
    pub phase: Phase,
    pub is_paused: bool,
    /// Payout of the last cleared level.
    pub winnings: u32,
    /// Payout of the highest safe haven cleared.
    pub safe_haven_amount: u32,
    pub selected_answers: BTreeSet<String>,
    /// Removed by 50:50; never contains a correct id.
    pub hidden_answers: BTreeSet<String>,
    pub audience_stats: Option<BTreeMap<String, u8>>,
    pub phone_hint: Option<String>,
    pub lifelines_used: LifelinesUsed,
    pub last_answer_correct: Option<bool>,
}

impl GameState {
    fn clear_question_artifacts(&mut self) {
        self.selected_answers.clear();
        self.hidden_answers.clear();
        self.audience_stats = None;
        self.phone_hint = None;
    }
}

/// Player-initiated actions.
///
/// The dramatic-delay transitions and timer expiry are driven by the runner
/// and are not part of this vocabulary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Start,
    SelectAnswer {
        #[serde(rename = "optionId")]
        option_id: String,
    },
    LockAnswer,
    FiftyFifty,
    PhoneAFriend,
    AskTheAudience,
    ContinueAfterFeedback,
    WalkAway,
    TogglePause,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::SelectAnswer { .. } => "select_answer",
            Action::LockAnswer => "lock_answer",
            Action::FiftyFifty => "fifty_fifty",
            Action::PhoneAFriend => "phone_a_friend",
            Action::AskTheAudience => "ask_the_audience",
            Action::ContinueAfterFeedback => "continue_after_feedback",
            Action::WalkAway => "walk_away",
            Action::TogglePause => "toggle_pause",
            Action::Reset => "reset",
        }
    }
}

#[derive(Debug)]
pub struct Game<R = StdRng> {
    /// Shared read-only with every other game.
    bank: Arc<Vec<Question>>,
    session: Option<Session>,
    state: GameState,
    script: Script,
    rng: R,
    epoch: u64,
}

impl<R: Rng> Game<R> {
    /// A game still waiting for its question bank.
    pub fn new(rng: R, script: Script) -> Self {
        Self {
            bank: Arc::default(),
            session: None,
            state: GameState { phase: Phase::Loading, ..GameState::default() },
            script,
            rng,
            epoch: 0,
        }
    }

    pub fn with_bank(bank: impl Into<Arc<Vec<Question>>>, rng: R, script: Script) -> Self {
        let mut game = Self::new(rng, script);
        game.load_bank(bank);
        game
    }

    /// Install the question bank; a game in `loading` moves to `intro`.
    pub fn load_bank(&mut self, bank: impl Into<Arc<Vec<Question>>>) {
        self.bank = bank.into();
        info!(target: "game", questions = self.bank.len(), "Question bank installed");
        if self.state.phase == Phase::Loading && !self.bank.is_empty() {
            self.set_phase(Phase::Intro);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Bumped on every phase change and on start/reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn bank_len(&self) -> usize {
        self.bank.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.get(self.state.position)
    }

    pub fn current_level(&self) -> Option<MoneyLevel> {
        level_at(self.state.position).ok()
    }

    /// Dispatch a player action.
    ///
    /// # Errors
    ///
    /// Only `start` can fail; see [`Game::start`].
    pub fn apply(&mut self, action: Action) -> Result<bool, GameError> {
        let applied = match action {
            Action::Start => return self.start(),
            Action::SelectAnswer { option_id } => self.select_answer(&option_id),
            Action::LockAnswer => self.lock_answer(),
            Action::FiftyFifty => self.use_lifeline(Lifeline::FiftyFifty),
            Action::PhoneAFriend => self.use_lifeline(Lifeline::PhoneAFriend),
            Action::AskTheAudience => self.use_lifeline(Lifeline::AskTheAudience),
            Action::ContinueAfterFeedback => self.continue_after_feedback(),
            Action::WalkAway => self.walk_away(),
            Action::TogglePause => self.toggle_pause(),
            Action::Reset => self.reset(),
        };
        Ok(applied)
    }

    /// Build a new session and begin at the first question.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyBank`] before a bank is loaded, and
    /// [`GameError::InsufficientQuestions`] when a tier is short. The game
    /// is left untouched in both cases.
    pub fn start(&mut self) -> Result<bool, GameError> {
        if self.state.is_paused {
            debug!(target: "game", action = "start", "Ignored while paused");
            return Ok(false);
        }
        if self.bank.is_empty() {
            return Err(GameError::EmptyBank);
        }
        let session = Session::build(&self.bank, &mut self.rng)?;

        self.session = Some(session);
        self.state = GameState { phase: Phase::Playing, ..GameState::default() };
        self.epoch += 1;
        info!(target: "game", epoch = self.epoch, "Game started");
        Ok(true)
    }

    pub fn select_answer(&mut self, option_id: &str) -> bool {
        if !self.accepts_player_input("select_answer") {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        if !question.has_option(option_id) || self.state.hidden_answers.contains(option_id) {
            debug!(target: "game", %option_id, "Ignored selection of unavailable option");
            return false;
        }

        let multi = question.is_multi();
        let selected = &mut self.state.selected_answers;
        if multi {
            if !selected.remove(option_id) {
                selected.insert(option_id.to_string());
            }
        } else {
            selected.clear();
            selected.insert(option_id.to_string());
        }
        true
    }

    pub fn lock_answer(&mut self) -> bool {
        if !self.accepts_player_input("lock_answer") {
            return false;
        }
        let lockable = self
            .current_question()
            .is_some_and(|q| can_lock(q, &self.state.selected_answers));
        if !lockable {
            debug!(target: "game", selected = self.state.selected_answers.len(), "Ignored lock: selection incomplete");
            return false;
        }
        self.set_phase(Phase::Locked);
        true
    }

    /// Evaluate the locked selection. Fired by the tension delay.
    pub fn reveal_answer(&mut self) -> bool {
        if self.state.phase != Phase::Locked {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        let correct = is_correct(question, &self.state.selected_answers);
        debug!(target: "game", question = %question.id, position = self.state.position, correct, "Answer revealed");
        self.state.last_answer_correct = Some(correct);
        self.set_phase(Phase::Revealed);
        true
    }

    /// Move from the reveal display to the feedback screen. Fired by the reveal delay.
    pub fn proceed_from_reveal(&mut self) -> bool {
        if self.state.phase != Phase::Revealed {
            return false;
        }
        self.set_phase(Phase::Feedback);
        true
    }

    pub fn continue_after_feedback(&mut self) -> bool {
        if self.state.is_paused || self.state.phase != Phase::Feedback {
            debug!(target: "game", action = "continue_after_feedback", phase = ?self.state.phase, paused = self.state.is_paused, "Ignored");
            return false;
        }

        if self.state.last_answer_correct == Some(true) {
            if self.state.position + 1 >= LADDER_SIZE {
                let top = top_payout();
                self.state.winnings = top;
                self.state.safe_haven_amount = top;
                self.set_phase(Phase::Won);
                info!(target: "game", winnings = top, "Game won");
                true
            } else {
                self.advance()
            }
        } else {
            self.state.winnings = self.state.safe_haven_amount;
            self.set_phase(Phase::Lost);
            info!(target: "game", position = self.state.position, winnings = self.state.winnings, "Game lost");
            true
        }
    }

    /// Bank the just-cleared level and move to the next question.
    fn advance(&mut self) -> bool {
        let level = match level_at(self.state.position) {
            Ok(level) => level,
            Err(e) => {
                error!(target: "game", error = %e, "Cannot advance");
                return false;
            }
        };
        if level.is_safe_haven() {
            self.state.safe_haven_amount = self.state.safe_haven_amount.max(level.payout());
        }
        self.state.winnings = level.payout();
        self.state.position += 1;
        self.state.clear_question_artifacts();
        self.set_phase(Phase::Playing);
        debug!(target: "game", position = self.state.position, winnings = self.state.winnings, safe_haven = self.state.safe_haven_amount, "Advanced");
        true
    }

    /// Leave with the current winnings.
    pub fn walk_away(&mut self) -> bool {
        if !self.accepts_player_input("walk_away") {
            return false;
        }
        self.state.safe_haven_amount = self.state.winnings;
        self.set_phase(Phase::Lost);
        info!(target: "game", position = self.state.position, winnings = self.state.winnings, "Walked away");
        true
    }

    /// The question's countdown ran out; same outcome as walking away.
    pub fn time_expired(&mut self) -> bool {
        if self.state.phase == Phase::Playing && !self.state.is_paused {
            info!(target: "game", position = self.state.position, "Time expired");
        }
        self.walk_away()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.is_paused = !self.state.is_paused;
        debug!(target: "game", paused = self.state.is_paused, "Pause toggled");
        true
    }

    /// Back to the intro screen; the next `start` samples a fresh session.
    pub fn reset(&mut self) -> bool {
        if self.state.is_paused {
            debug!(target: "game", action = "reset", "Ignored while paused");
            return false;
        }
        let phase = if self.bank.is_empty() { Phase::Loading } else { Phase::Intro };
        self.session = None;
        self.state = GameState { phase, ..GameState::default() };
        self.epoch += 1;
        info!(target: "game", epoch = self.epoch, "Game reset");
        true
    }

    /// Spend a lifeline on the active question. Each works once per game.
    pub fn use_lifeline(&mut self, lifeline: Lifeline) -> bool {
        if !self.accepts_player_input("lifeline") {
            return false;
        }
        if self.state.lifelines_used.is_used(lifeline) {
            debug!(target: "game", ?lifeline, "Ignored: lifeline already used");
            return false;
        }
        let Some(question) = self.session.as_ref().and_then(|s| s.get(self.state.position)) else {
            return false;
        };

        match lifeline {
            Lifeline::FiftyFifty => {
                self.state.hidden_answers = lifelines::fifty_fifty(question, &mut self.rng);
                // Hidden options cannot stay selected.
                let hidden = &self.state.hidden_answers;
                self.state.selected_answers.retain(|id| !hidden.contains(id));
            }
            Lifeline::PhoneAFriend => {
                self.state.phone_hint = Some(lifelines::phone_a_friend(
                    question,
                    &self.script.phone_hint_template,
                    &self.script.multi_answer_phrase,
                ));
            }
            Lifeline::AskTheAudience => {
                self.state.audience_stats = Some(lifelines::ask_the_audience(question, &mut self.rng));
            }
        }
        self.state.lifelines_used.mark(lifeline);
        debug!(target: "game", ?lifeline, question = %question.id, "Lifeline used");
        true
    }

    fn accepts_player_input(&self, action: &str) -> bool {
        if self.state.is_paused {
            debug!(target: "game", %action, "Ignored while paused");
            return false;
        }
        if self.state.phase != Phase::Playing {
            debug!(target: "game", %action, phase = ?self.state.phase, "Ignored outside playing");
            return false;
        }
        true
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            debug!(target: "game", from = ?self.state.phase, to = ?phase, "Phase change");
            self.state.phase = phase;
            self.epoch += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tests::{multi, single};
    use crate::domain::Tier;
    use rand::SeedableRng;

    /// Six questions per difficulty; every third is multi-select.
    fn bank() -> Vec<Question> {
        let mut out = Vec::new();
        for difficulty in 1..=5u8 {
            for n in 0..6 {
                let id = format!("d{difficulty}-{n}");
                out.push(if n % 3 == 0 { multi(&id, difficulty, &["b", "d"]) } else { single(&id, difficulty, "c") });
            }
        }
        out
    }

    fn game() -> Game {
        Game::with_bank(bank(), StdRng::seed_from_u64(2024), Script::default())
    }

    fn started() -> Game {
        let mut g = game();
        assert_eq!(g.start(), Ok(true));
        g
    }

    fn correct_ids(g: &Game) -> Vec<String> {
        g.current_question().unwrap().correct.ids().into_iter().map(String::from).collect()
    }

    fn wrong_id(g: &Game) -> String {
        g.current_question().unwrap().incorrect_ids()[0].to_string()
    }

    /// Select, lock and run the timed transitions up to the feedback screen.
    fn answer(g: &mut Game, ids: &[String]) {
        for id in ids {
            assert!(g.select_answer(id));
        }
        assert!(g.lock_answer());
        assert!(g.reveal_answer());
        assert!(g.proceed_from_reveal());
        assert_eq!(g.phase(), Phase::Feedback);
    }

    fn clear_current(g: &mut Game) {
        let ids = correct_ids(g);
        answer(g, &ids);
        assert!(g.continue_after_feedback());
    }

    #[test]
    fn loading_until_bank_arrives() {
        let mut g: Game = Game::new(StdRng::seed_from_u64(1), Script::default());
        assert_eq!(g.phase(), Phase::Loading);
        assert_eq!(g.start(), Err(GameError::EmptyBank));
        assert_eq!(g.phase(), Phase::Loading);

        g.load_bank(bank());
        assert_eq!(g.phase(), Phase::Intro);
        assert_eq!(g.bank_len(), 30);
    }

    #[test]
    fn start_builds_a_session() {
        let g = started();
        assert_eq!(g.phase(), Phase::Playing);
        assert_eq!(g.session().unwrap().len(), LADDER_SIZE);
        assert_eq!(g.state().position, 0);
        assert_eq!(g.current_question().unwrap().tier(), Some(Tier::Foundation));
        assert_eq!(g.current_level().unwrap().payout(), 100);
    }

    #[test]
    fn start_with_short_tier_stays_in_intro() {
        let short: Vec<Question> = bank().into_iter().filter(|q| q.difficulty < 4).collect();
        let mut g: Game = Game::with_bank(short, StdRng::seed_from_u64(1), Script::default());
        let err = g.start().unwrap_err();
        assert!(matches!(err, GameError::InsufficientQuestions { tier: Tier::Professional, available: 0, .. }));
        assert_eq!(g.phase(), Phase::Intro);
        assert!(g.session().is_none());
    }

    #[test]
    fn restart_resets_every_field() {
        let mut g = started();
        clear_current(&mut g);
        g.use_lifeline(Lifeline::PhoneAFriend);
        let wrong = wrong_id(&g);
        g.select_answer(&wrong);
        assert_eq!(g.start(), Ok(true));
        assert_eq!(g.state(), &GameState { phase: Phase::Playing, ..GameState::default() });
    }

    #[test]
    fn single_choice_selection_replaces() {
        let mut g = started();
        while g.current_question().unwrap().is_multi() {
            clear_current(&mut g);
        }
        assert!(g.select_answer("a"));
        assert!(g.select_answer("b"));
        assert_eq!(g.state().selected_answers.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn multi_select_toggles() {
        let mut g = started();
        while !g.current_question().unwrap().is_multi() {
            clear_current(&mut g);
        }
        assert!(g.select_answer("a"));
        assert!(g.select_answer("b"));
        assert!(g.select_answer("a"));
        assert_eq!(g.state().selected_answers.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut g = started();
        assert!(!g.select_answer("z"));
        assert!(g.state().selected_answers.is_empty());
    }

    #[test]
    fn lock_needs_a_selection() {
        let mut g = started();
        let epoch = g.epoch();
        assert!(!g.lock_answer());
        assert_eq!(g.phase(), Phase::Playing);
        assert_eq!(g.epoch(), epoch);

        g.select_answer("a");
        assert!(g.lock_answer());
        assert_eq!(g.phase(), Phase::Locked);
        assert!(g.epoch() > epoch);

        // Committed: no more changes.
        assert!(!g.select_answer("b"));
        assert!(g.state().selected_answers.contains("a"));
    }

    #[test]
    fn reveal_only_after_lock() {
        let mut g = started();
        assert!(!g.reveal_answer());
        assert!(!g.proceed_from_reveal());
        assert!(!g.continue_after_feedback());
        assert_eq!(g.phase(), Phase::Playing);
    }

    #[test]
    fn reveal_records_outcome() {
        let mut g = started();
        let wrong = wrong_id(&g);
        answer(&mut g, &[wrong]);
        assert_eq!(g.state().last_answer_correct, Some(false));
    }

    #[test]
    fn full_correct_run_wins_the_top_prize() {
        let mut g = started();
        let mut last_safe = 0;
        for expected_pos in 0..LADDER_SIZE {
            assert_eq!(g.state().position, expected_pos);
            clear_current(&mut g);
            assert!(g.state().safe_haven_amount >= last_safe);
            last_safe = g.state().safe_haven_amount;
            if expected_pos + 1 < LADDER_SIZE {
                assert_eq!(g.state().position, expected_pos + 1);
                assert_eq!(g.state().winnings, level_at(expected_pos).unwrap().payout());
                assert_eq!(g.phase(), Phase::Playing);
            }
        }
        assert_eq!(g.phase(), Phase::Won);
        assert_eq!(g.state().winnings, 1_000_000);
        assert_eq!(g.state().safe_haven_amount, 1_000_000);
        assert!(g.phase().is_terminal());
    }

    #[test]
    fn losing_after_safe_haven_keeps_it() {
        let mut g = started();
        for _ in 0..5 {
            clear_current(&mut g);
        }
        assert_eq!(g.state().safe_haven_amount, 1_000);
        assert_eq!(g.state().winnings, 1_000);

        clear_current(&mut g);
        assert_eq!(g.state().winnings, 2_000);

        let wrong = wrong_id(&g);
        answer(&mut g, &[wrong]);
        assert!(g.continue_after_feedback());
        assert_eq!(g.phase(), Phase::Lost);
        assert_eq!(g.state().winnings, 1_000);
    }

    #[test]
    fn losing_before_any_safe_haven_pays_nothing() {
        let mut g = started();
        clear_current(&mut g);
        let wrong = wrong_id(&g);
        answer(&mut g, &[wrong]);
        g.continue_after_feedback();
        assert_eq!(g.phase(), Phase::Lost);
        assert_eq!(g.state().winnings, 0);
    }

    #[test]
    fn walking_away_banks_last_cleared_level() {
        let mut g = started();
        clear_current(&mut g);
        clear_current(&mut g);
        assert_eq!(g.state().position, 2);

        assert!(g.walk_away());
        assert_eq!(g.phase(), Phase::Lost);
        assert_eq!(g.state().winnings, level_at(1).unwrap().payout());
        assert_eq!(g.state().safe_haven_amount, g.state().winnings);
    }

    #[test]
    fn walk_away_only_while_playing() {
        let mut g = started();
        g.select_answer("a");
        g.lock_answer();
        assert!(!g.walk_away());
        assert_eq!(g.phase(), Phase::Locked);
    }

    #[test]
    fn time_expiry_acts_like_walking_away() {
        let mut g = started();
        clear_current(&mut g);
        assert!(g.time_expired());
        assert_eq!(g.phase(), Phase::Lost);
        assert_eq!(g.state().winnings, 100);
        assert_eq!(g.state().safe_haven_amount, 100);
    }

    #[test]
    fn pause_blocks_player_actions_and_timer() {
        let mut g = started();
        assert!(g.toggle_pause());
        let before = g.state().clone();

        assert!(!g.select_answer("a"));
        assert!(!g.lock_answer());
        assert!(!g.walk_away());
        assert!(!g.time_expired());
        assert!(!g.use_lifeline(Lifeline::FiftyFifty));
        assert!(!g.reset());
        assert_eq!(g.start(), Ok(false));
        assert_eq!(g.state(), &before);

        assert!(g.toggle_pause());
        assert!(!g.state().is_paused);
        assert!(g.select_answer("a"));
    }

    #[test]
    fn pause_does_not_hold_dramatic_transitions() {
        let mut g = started();
        g.select_answer("a");
        g.lock_answer();
        g.toggle_pause();
        assert!(g.reveal_answer());
        assert!(g.proceed_from_reveal());
        assert!(!g.continue_after_feedback());
        assert_eq!(g.phase(), Phase::Feedback);
    }

    #[test]
    fn fifty_fifty_hides_wrong_answers() {
        let mut g = started();
        assert!(g.use_lifeline(Lifeline::FiftyFifty));
        let q = g.current_question().unwrap();
        let hidden = &g.state().hidden_answers;
        // Single-choice: two of three wrong. Multi-select: one of two wrong.
        let expected = if q.is_multi() { 1 } else { 2 };
        assert_eq!(hidden.len(), expected);
        assert!(hidden.iter().all(|id| !q.is_correct_id(id)));

        let hidden_id = hidden.iter().next().unwrap().clone();
        assert!(!g.select_answer(&hidden_id));
    }

    #[test]
    fn fifty_fifty_drops_hidden_selection() {
        let mut g = started();
        while !g.current_question().unwrap().is_multi() {
            clear_current(&mut g);
        }
        // Multi-select questions here have two wrong options, a and c; one stays visible.
        g.select_answer("a");
        g.select_answer("c");
        g.select_answer("b");
        assert!(g.use_lifeline(Lifeline::FiftyFifty));
        let s = g.state();
        assert_eq!(s.hidden_answers.len(), 1);
        let hidden = s.hidden_answers.iter().next().unwrap();
        assert!(hidden == "a" || hidden == "c");
        assert_eq!(s.selected_answers.len(), 2);
        assert!(s.selected_answers.contains("b"));
        assert!(!s.selected_answers.contains(hidden));
    }

    #[test]
    fn each_lifeline_once_per_game() {
        let mut g = started();
        for lifeline in [Lifeline::FiftyFifty, Lifeline::PhoneAFriend, Lifeline::AskTheAudience] {
            assert!(g.use_lifeline(lifeline));
            let before = g.state().clone();
            assert!(!g.use_lifeline(lifeline));
            assert_eq!(g.state(), &before);
            assert!(g.state().lifelines_used.is_used(lifeline));
        }

        clear_current(&mut g);
        let s = g.state();
        assert!(s.hidden_answers.is_empty());
        assert!(s.audience_stats.is_none());
        assert!(s.phone_hint.is_none());
        assert!(s.selected_answers.is_empty());
        assert_eq!(s.lifelines_used, LifelinesUsed { fifty_fifty: true, phone: true, audience: true });

        assert!(!g.use_lifeline(Lifeline::AskTheAudience));
        assert!(g.state().audience_stats.is_none());
    }

    #[test]
    fn lifelines_need_playing_phase() {
        let mut g = game();
        assert!(!g.use_lifeline(Lifeline::PhoneAFriend));
        assert!(!g.state().lifelines_used.phone);
    }

    #[test]
    fn phone_and_audience_artifacts() {
        let mut g = started();
        g.use_lifeline(Lifeline::PhoneAFriend);
        g.use_lifeline(Lifeline::AskTheAudience);
        let s = g.state();
        assert!(s.phone_hint.as_deref().unwrap().contains("85%"));
        let stats = s.audience_stats.as_ref().unwrap();
        assert_eq!(stats.values().map(|v| u32::from(*v)).sum::<u32>(), 100);
    }

    #[test]
    fn reset_returns_to_intro() {
        let mut g = started();
        clear_current(&mut g);
        g.use_lifeline(Lifeline::FiftyFifty);
        assert!(g.reset());
        assert_eq!(g.phase(), Phase::Intro);
        assert!(g.session().is_none());
        assert_eq!(g.state(), &GameState::default());
        assert!(g.current_question().is_none());
    }

    #[test]
    fn terminal_phases_ignore_play() {
        let mut g = started();
        g.walk_away();
        assert!(!g.select_answer("a"));
        assert!(!g.continue_after_feedback());
        assert!(!g.use_lifeline(Lifeline::PhoneAFriend));
        assert_eq!(g.phase(), Phase::Lost);
    }

    #[test]
    fn epoch_moves_on_phase_changes_only() {
        let mut g = started();
        let e0 = g.epoch();
        g.select_answer("a");
        g.use_lifeline(Lifeline::PhoneAFriend);
        assert_eq!(g.epoch(), e0);
        g.lock_answer();
        assert_eq!(g.epoch(), e0 + 1);
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut g = game();
        assert_eq!(g.apply(Action::Start), Ok(true));
        assert_eq!(g.apply(Action::SelectAnswer { option_id: "a".into() }), Ok(true));
        assert_eq!(g.apply(Action::LockAnswer), Ok(true));
        assert_eq!(g.phase(), Phase::Locked);
        assert_eq!(g.apply(Action::WalkAway), Ok(false));
        assert_eq!(g.apply(Action::TogglePause), Ok(true));
        assert!(g.state().is_paused);
    }

    #[test]
    fn action_wire_format() {
        let a: Action = serde_json::from_str(r#"{"type":"select_answer","optionId":"b"}"#).unwrap();
        assert_eq!(a, Action::SelectAnswer { option_id: "b".into() });
        let b: Action = serde_json::from_str(r#"{"type":"continue_after_feedback"}"#).unwrap();
        assert_eq!(b.name(), "continue_after_feedback");
    }
}
