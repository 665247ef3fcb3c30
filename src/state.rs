//! Application state: the loaded question bank, configuration, and the registry of live games.
//!
//! This module owns:
//!   - the validated question bank (shared read-only by every game)
//!   - the `GameConfig` (from TOML or defaults)
//!   - one `GameHandle` per live game, keyed by a UUID
//!
//! A bank file that cannot be loaded is logged and replaced by the embedded bank.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::bank::{load_bank, BankSource};
use crate::config::{load_game_config_from_env, GameConfig};
use crate::domain::Question;
use crate::game::Game;
use crate::runner::GameHandle;
use crate::seeds::seed_questions;

#[derive(Clone)]
pub struct AppState {
    pub games: Arc<RwLock<HashMap<String, GameHandle>>>,
    pub bank: Arc<Vec<Question>>,
    pub config: GameConfig,
    /// Games created so far; offsets the configured seed.
    created: Arc<AtomicU64>,
}

impl AppState {
    /// Build state from env: load config, then the question bank it points to.
    #[instrument(level = "info", skip_all)]
    pub async fn new() -> Self {
        let config = load_game_config_from_env().unwrap_or_default();
        let source = BankSource::from_config(config.question_bank.as_deref());

        let bank = match load_bank(&source).await {
            Ok(bank) => bank,
            Err(e) => {
                error!(target: "bank", error = %e, "Question bank failed to load; using embedded bank");
                seed_questions()
            }
        };
        info!(target: "millionaire_backend", questions = bank.len(), seed = ?config.seed, "Application state ready");
        Self::with_parts(bank, config)
    }

    pub fn with_parts(bank: Vec<Question>, config: GameConfig) -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            bank: Arc::new(bank),
            config,
            created: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a runner for a fresh game in `intro` and register it.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_game(&self) -> (String, GameHandle) {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_entropy(),
        };
        let game = Game::with_bank(Arc::clone(&self.bank), rng, self.config.script.clone());
        debug!(target: "game", n, questions = game.bank_len(), "Spawning runner");
        let handle = GameHandle::spawn(game, self.config.timing, self.config.timer);

        let id = Uuid::new_v4().to_string();
        self.games.write().await.insert(id.clone(), handle.clone());
        info!(target: "game", game_id = %id, "Game created");
        (id, handle)
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_game(&self, id: &str) -> Option<GameHandle> {
        self.games.read().await.get(id).cloned()
    }

    /// Unregister a game. Its runner stops once the remaining handles are gone.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_game(&self, id: &str) -> bool {
        let removed = self.games.write().await.remove(id).is_some();
        if removed {
            info!(target: "game", game_id = %id, "Game removed");
        }
        removed
    }
}
