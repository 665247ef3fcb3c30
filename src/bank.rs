//! Question bank adapter: embedded seeds or a TOML file, validated on load.
//!
//! File format:
//!
//! ```toml
//! [[questions]]
//! id = "q2"
//! difficulty = 1
//! domain = "Designing and Planning"
//! text = "How should you organize networking?"
//! correct = "c"            # or ["b", "d"] for multi-select
//! explanation = "..."
//!
//! [[questions.options]]
//! id = "a"
//! text = "Peered VPC"      # label defaults to "A"
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domain::{Question, Tier};
use crate::error::BankLoadError;
use crate::seeds::seed_questions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BankSource {
    Embedded,
    File(PathBuf),
}

impl BankSource {
    pub fn from_config(path: Option<&str>) -> Self {
        match path {
            Some(p) if !p.trim().is_empty() => BankSource::File(PathBuf::from(p)),
            _ => BankSource::Embedded,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BankFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Load and validate the bank from `source`.
///
/// # Errors
///
/// I/O and TOML failures, and the first question that breaks an invariant.
#[instrument(level = "info", skip_all, fields(source = ?source))]
pub async fn load_bank(source: &BankSource) -> Result<Vec<Question>, BankLoadError> {
    let questions = match source {
        BankSource::Embedded => seed_questions(),
        BankSource::File(path) => {
            let shown = path.display().to_string();
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| BankLoadError::Io { path: shown.clone(), source })?;
            parse_bank(&raw, &shown)?
        }
    };
    let questions = validate_bank(questions)?;

    for tier in Tier::ALL {
        let count = questions.iter().filter(|q| q.tier() == Some(tier)).count();
        info!(target: "bank", %tier, count, "Question bank inventory");
    }
    Ok(questions)
}

fn parse_bank(raw: &str, path: &str) -> Result<Vec<Question>, BankLoadError> {
    let file: BankFile = toml::from_str(raw).map_err(|source| BankLoadError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(file.questions)
}

/// Normalize labels, check every question and reject duplicate ids.
pub fn validate_bank(questions: Vec<Question>) -> Result<Vec<Question>, BankLoadError> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .map(|q| {
            let q = q.normalized();
            q.validate()?;
            if !seen.insert(q.id.clone()) {
                return Err(BankLoadError::InvalidQuestion {
                    id: q.id,
                    reason: "duplicate question id".into(),
                });
            }
            Ok(q)
        })
        .collect()
}
