#![allow(dead_code)]

use async_trait::async_trait;

use trade_coach::generation::{GenerationError, TextGenerator};
use trade_coach::store::{StoreError, TradeStore};
use trade_coach::trading::TradeRecord;

/// Record for `user_id` with the given pnl, label, notes and entry date.
pub fn record(user_id: &str, pnl: f64, trade_type: &str, notes: &str, date: &str) -> TradeRecord {
    TradeRecord {
        id: format!("{}-{}", user_id, date),
        user_id: user_id.to_string(),
        trade_type: trade_type.to_string(),
        pnl,
        notes: notes.to_string(),
        entry_date: Some(date.to_string()),
    }
}

/// Records for `user_id` from (pnl, label, notes) tuples, one day apart,
/// oldest first.
pub fn history(user_id: &str, rows: &[(f64, &str, &str)]) -> Vec<TradeRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, &(pnl, label, notes))| {
            record(user_id, pnl, label, notes, &format!("2024-01-{:02}T10:00:00+00:00", i + 1))
        })
        .collect()
}

/// A store whose every query fails like an unreachable database.
pub struct FailingStore;

#[async_trait]
impl TradeStore for FailingStore {
    async fn recent_trades(&self, _user_id: &str, _limit: usize) -> Result<Vec<TradeRecord>, StoreError> {
        Err(StoreError::Status {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}

/// Generator that appends a fixed completion to the prompt, like a
/// full-text pipeline.
pub struct EchoGenerator(pub String);

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str, _max_length: usize) -> Result<String, GenerationError> {
        Ok(format!("{} {}", prompt, self.0))
    }
}

/// Generator that always fails.
pub struct BrokenGenerator;

#[async_trait]
impl TextGenerator for BrokenGenerator {
    async fn generate(&self, _prompt: &str, _max_length: usize) -> Result<String, GenerationError> {
        Err(GenerationError::EmptyResponse)
    }
}
