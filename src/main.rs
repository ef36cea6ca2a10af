use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_coach::coach::CoachResponder;
use trade_coach::config::Config;
use trade_coach::generation::{HuggingFaceGenerator, TextGenerator};
use trade_coach::server::{build_router, AppState};
use trade_coach::store::{MemoryTradeStore, SupabaseStore, TradeStore};
use trade_coach::trading::TradeAnalyzer;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!("{}", "=".repeat(60));
    info!("Trade Analysis API starting up");

    let store = build_store(&cfg)?;
    let generator = build_generator(&cfg);
    let coach = CoachResponder::new(generator, cfg.generation_max_length);

    info!("Trade limit: {} | notes sample: {}", cfg.trade_limit, cfg.notes_sample_size);
    info!("{}", "=".repeat(60));

    let state = AppState::new(store, TradeAnalyzer::new(cfg.notes_sample_size), coach)
        .with_trade_limit(cfg.trade_limit);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!("Listening on {}", cfg.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

fn build_store(cfg: &Config) -> Result<Arc<dyn TradeStore>> {
    if let Some(path) = &cfg.trades_file {
        let store = MemoryTradeStore::from_json_file(path)?;
        info!("Trade store: {} records from {}", store.len(), path);
        return Ok(Arc::new(store));
    }

    let store = SupabaseStore::new(cfg).context("Failed to create Supabase client")?;
    if store.has_credentials() {
        info!("Trade store: Supabase at {}", cfg.supabase_url);
    } else {
        warn!("SUPABASE_URL / SUPABASE_SERVICE_KEY not set; trade queries will fail");
    }
    Ok(Arc::new(store))
}

fn build_generator(cfg: &Config) -> Option<Arc<dyn TextGenerator>> {
    if !cfg.generation_enabled() {
        info!("Generation: disabled, template replies only");
        return None;
    }

    match HuggingFaceGenerator::new(cfg) {
        Ok(gen) => {
            info!("Generation: {} (max_length {})", gen.endpoint(), cfg.generation_max_length);
            Some(Arc::new(gen))
        }
        Err(e) => {
            warn!("Generation backend unavailable, template replies only: {}", e);
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
