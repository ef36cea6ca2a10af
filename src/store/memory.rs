use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use crate::store::{StoreError, TradeStore};
use crate::trading::TradeRecord;

/// A TradeStore over records held in memory, keyed by `user_id`.
/// Used for local development (seeded from a JSON export) and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryTradeStore {
    data: HashMap<String, Vec<TradeRecord>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        let mut store = Self::new();
        for rec in records {
            store.insert(rec);
        }
        store
    }

    /// Load a JSON array of trade records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file_err = |reason: String| StoreError::File {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| file_err(e.to_string()))?;
        let records: Vec<TradeRecord> =
            serde_json::from_str(&content).map_err(|e| file_err(e.to_string()))?;
        Ok(Self::from_records(records))
    }

    pub fn insert(&mut self, record: TradeRecord) {
        self.data
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latest `limit` records across every user, newest first.
    pub fn latest(&self, limit: usize) -> Vec<TradeRecord> {
        newest_first(self.data.values().flatten().cloned().collect(), limit)
    }
}

// Undated rows sort last. Dates compare as ISO-8601 strings.
fn newest_first(mut rows: Vec<TradeRecord>, limit: usize) -> Vec<TradeRecord> {
    rows.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
    rows.truncate(limit);
    rows
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn recent_trades(&self, user_id: &str, limit: usize) -> Result<Vec<TradeRecord>, StoreError> {
        let rows = self.data.get(user_id).cloned().unwrap_or_default();
        Ok(newest_first(rows, limit))
    }
}
