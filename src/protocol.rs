//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{AnswerOption, Question};
use crate::game::{Action, Game, GameState, Phase};
use crate::ladder::LADDER_SIZE;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// Create a game and bind this socket to it.
    NewGame,
    /// Bind this socket to an existing game.
    Join {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    Action {
        action: Action,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Joined {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    /// Pushed on every change of the bound game.
    State {
        state: Snapshot,
    },
    Error {
        message: String,
    },
}

/// Read-only view of a game, as rendered by the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    pub state: GameState,
    /// 1-based, for display.
    pub question_number: usize,
    pub total_questions: usize,
    /// Prize for clearing the active question.
    pub current_prize: Option<u32>,
    pub seconds_remaining: Option<u32>,
    pub question: Option<QuestionOut>,
}

/// Active question as shown to the player. The answer appears once revealed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub id: String,
    pub text: String,
    pub domain: String,
    pub difficulty: u8,
    pub options: Vec<AnswerOption>,
    pub multi_select: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionOut {
    fn from_question(q: &Question, revealed: bool) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            domain: q.domain.clone(),
            difficulty: q.difficulty,
            options: q.options.clone(),
            multi_select: q.is_multi(),
            correct_answers: revealed.then(|| q.correct.ids().into_iter().map(String::from).collect()),
            explanation: revealed.then(|| q.explanation.clone()),
        }
    }
}

impl Snapshot {
    pub fn capture<R: Rng>(game: &Game<R>, seconds_remaining: Option<u32>) -> Self {
        let state = game.state().clone();
        let revealed = matches!(state.phase, Phase::Revealed | Phase::Feedback) || state.phase.is_terminal();
        let question = game.current_question().map(|q| QuestionOut::from_question(q, revealed));
        Self {
            question_number: state.position + 1,
            total_questions: game.session().map_or(LADDER_SIZE, |s| s.len()),
            current_prize: game.current_level().map(|l| l.payout()),
            seconds_remaining,
            question,
            state,
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Serialize)]
pub struct NewGameOut {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub state: Snapshot,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
