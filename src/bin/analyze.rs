use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use trade_coach::coach::CoachResponder;
use trade_coach::config::Config;
use trade_coach::generation::{HuggingFaceGenerator, TextGenerator};
use trade_coach::store::{MemoryTradeStore, TradeStore};
use trade_coach::trading::{AnalysisResult, TradeAnalyzer, TradeRecord};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // analyze <trades.json> [user_id] [question...]
    let args: Vec<String> = std::env::args().collect();

    let Some(path) = args.get(1) else {
        println!("Usage: analyze <trades.json> [user_id] [question...]");
        return Ok(());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path))?;
    let all: Vec<TradeRecord> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;

    // Same newest-first, limited view the API uses; all users when none is named
    let store = MemoryTradeStore::from_records(all);
    let trades = match args.get(2) {
        Some(user_id) => store.recent_trades(user_id, cfg.trade_limit).await?,
        None => store.latest(cfg.trade_limit),
    };
    let question = if args.len() > 3 {
        Some(args[3..].join(" "))
    } else {
        None
    };

    let analysis = TradeAnalyzer::new(cfg.notes_sample_size).analyze(&trades);
    print_summary(path, trades.len(), &analysis);

    if let Some(question) = question {
        let generator: Option<Arc<dyn TextGenerator>> = if cfg.generation_enabled() {
            match HuggingFaceGenerator::new(&cfg) {
                Ok(g) => Some(Arc::new(g) as Arc<dyn TextGenerator>),
                Err(e) => {
                    warn!("Text generation unavailable, using template replies: {}", e);
                    None
                }
            }
        } else {
            None
        };
        let coach = CoachResponder::new(generator, cfg.generation_max_length);
        let reply = coach.respond(&question, &analysis).await;

        println!();
        println!("Q: {}", question);
        println!("A: {}", reply);
    }

    Ok(())
}

fn print_summary(path: &str, count: usize, analysis: &AnalysisResult) {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║          TRADE COACH — OFFLINE ANALYSIS                  ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!("Source:     {}", path);
    println!("Trades:     {}", count);
    println!("Win Rate:   {:.1}%", analysis.win_rate * 100.0);
    println!("Avg P&L:    ${:+.2}", analysis.avg_profit_loss);
    println!();
    print_list("Strategies", &analysis.strategies);
    print_list("Strengths", &analysis.strengths);
    print_list("Weaknesses", &analysis.weaknesses);
    print_list("Suggestions", &analysis.suggestions);
}

fn print_list(title: &str, items: &[String]) {
    println!("{}:", title);
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  - {}", item);
    }
}
