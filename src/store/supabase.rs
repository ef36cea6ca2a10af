use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::store::{StoreError, TradeStore};
use crate::trading::trade_record::{TradeRecord, TRADE_COLUMNS};

const TRADES_TABLE: &str = "trades";

struct Credentials {
    url: String,
    service_key: String,
}

/// PostgREST client for the Supabase `trades` table.
///
/// A store built without credentials still constructs; every query then
/// fails with [`StoreError::MissingCredentials`].
pub struct SupabaseStore {
    client: Client,
    credentials: Option<Credentials>,
}

impl SupabaseStore {
    pub fn new(cfg: &Config) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;

        let credentials = if cfg.supabase_configured() {
            Some(Credentials {
                url: cfg.supabase_url.clone(),
                service_key: cfg.supabase_service_key.clone(),
            })
        } else {
            None
        };

        Ok(Self {
            client,
            credentials,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl TradeStore for SupabaseStore {
    async fn recent_trades(&self, user_id: &str, limit: usize) -> Result<Vec<TradeRecord>, StoreError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(StoreError::MissingCredentials)?;

        let url = format!("{}/rest/v1/{}", creds.url, TRADES_TABLE);
        debug!(user_id, limit, "Querying trades");

        let resp = self
            .client
            .get(&url)
            .query(&trade_query(user_id, limit))
            .header("apikey", &creds.service_key)
            .bearer_auth(&creds.service_key)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows = decode_rows(&body)?;
        debug!(user_id, rows = rows.len(), "Fetched trades");
        Ok(rows)
    }
}

/// PostgREST filter: the user's rows, selected columns, newest first.
fn trade_query(user_id: &str, limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("select", TRADE_COLUMNS.join(",")),
        ("user_id", format!("eq.{}", user_id)),
        ("order", "entry_date.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

fn decode_rows(body: &str) -> Result<Vec<TradeRecord>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}
