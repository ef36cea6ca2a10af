use serde::{Deserialize, Serialize};

/// Upper bound on rows fetched per request.
pub const MAX_TRADE_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    pub bind_addr: String,

    // Trade store
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub trades_file: Option<String>,
    pub trade_limit: usize,

    // Analysis
    pub notes_sample_size: usize,

    // Text generation (empty model disables it)
    pub hf_api_url: String,
    pub hf_model: String,
    pub hf_api_token: String,
    pub generation_max_length: usize,

    // Outbound HTTP
    pub http_timeout_secs: u64,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let trades_file = env("TRADES_FILE", "");

        Config {
            bind_addr: env("BIND_ADDR", "0.0.0.0:8000"),
            supabase_url: env("SUPABASE_URL", "").trim_end_matches('/').to_string(),
            supabase_service_key: env("SUPABASE_SERVICE_KEY", ""),
            trades_file: if trades_file.is_empty() {
                None
            } else {
                Some(trades_file)
            },
            trade_limit: parse_trade_limit(&env("TRADE_LIMIT", "100")),
            notes_sample_size: env("NOTES_SAMPLE_SIZE", "50").parse().unwrap_or(50),
            hf_api_url: env("HF_API_URL", "https://api-inference.huggingface.co")
                .trim_end_matches('/')
                .to_string(),
            hf_model: env("HF_MODEL", "distilgpt2"),
            hf_api_token: env("HF_API_TOKEN", ""),
            generation_max_length: env("GENERATION_MAX_LENGTH", "150")
                .parse()
                .unwrap_or(150),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn generation_enabled(&self) -> bool {
        !self.hf_model.trim().is_empty()
    }

    pub fn supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_service_key.is_empty()
    }
}

/// Unparseable or zero falls back to the maximum; larger values are clamped.
fn parse_trade_limit(raw: &str) -> usize {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .map_or(MAX_TRADE_LIMIT, |n| n.min(MAX_TRADE_LIMIT))
}
