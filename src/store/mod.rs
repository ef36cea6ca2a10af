pub mod memory;
pub mod supabase;

pub use memory::MemoryTradeStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::trading::TradeRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing Supabase credentials")]
    MissingCredentials,
    #[error("trade store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("trade store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode trade rows: {0}")]
    Decode(String),
    #[error("could not load trades file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Read-only source of a user's trade history.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// At most `limit` records for `user_id`, newest entry date first.
    async fn recent_trades(&self, user_id: &str, limit: usize) -> Result<Vec<TradeRecord>, StoreError>;
}
