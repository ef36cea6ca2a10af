use async_trait::async_trait;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::generation::{GenerationError, TextGenerator};
use crate::trading::TradeRecord;

/// Single record with the given pnl, strategy label and notes.
pub fn trade(pnl: f64, trade_type: &str, notes: &str) -> TradeRecord {
    TradeRecord {
        id: String::new(),
        user_id: "test-user".to_string(),
        trade_type: trade_type.to_string(),
        pnl,
        notes: notes.to_string(),
        entry_date: None,
    }
}

/// Unlabelled, note-free records with sequential ids and one-day spaced
/// entry dates, newest first.
pub fn make_trades(pnls: &[f64]) -> Vec<TradeRecord> {
    let newest = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    pnls.iter()
        .enumerate()
        .map(|(i, &pnl)| TradeRecord {
            id: (i + 1).to_string(),
            entry_date: Some((newest - Duration::days(i as i64)).to_rfc3339()),
            ..trade(pnl, "", "")
        })
        .collect()
}

enum Reply {
    Completion(String),
    Status(u16, String),
}

/// Generator that echoes the prompt followed by a canned completion, or
/// fails with a canned status. Counts calls.
pub struct ScriptedGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn replying(completion: &str) -> Self {
        Self {
            reply: Reply::Completion(completion.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Status(status, body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _max_length: usize) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Completion(text) => Ok(format!("{}{}", prompt, text)),
            Reply::Status(status, body) => Err(GenerationError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// A Config suitable for testing: no credentials, generation disabled.
pub fn default_test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        supabase_url: String::new(),
        supabase_service_key: String::new(),
        trades_file: None,
        trade_limit: 100,
        notes_sample_size: 50,
        hf_api_url: "http://127.0.0.1:9".to_string(),
        hf_model: String::new(),
        hf_api_token: String::new(),
        generation_max_length: 150,
        http_timeout_secs: 1,
        log_level: "debug".to_string(),
    }
}

/// A request seen by a [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct StubState {
    status: StatusCode,
    reply: String,
    seen: Mutex<Vec<RecordedRequest>>,
}

/// Local HTTP backend that answers every request on `path` with a canned
/// status and body, recording what it was sent.
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    pub async fn spawn(path: &str, status: u16, reply: &str) -> Self {
        let state = Arc::new(StubState {
            status: StatusCode::from_u16(status).unwrap(),
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route(path, axum::routing::any(record_and_reply))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

async fn record_and_reply(
    State(state): State<Arc<StubState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.seen.lock().unwrap().push(RecordedRequest {
        query,
        headers,
        body,
    });
    (state.status, state.reply.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_trades_dates_keep_decreasing() {
        let trades = make_trades(&[1.0; 60]);
        for pair in trades.windows(2) {
            assert!(pair[0].entry_date > pair[1].entry_date);
        }
    }
}
