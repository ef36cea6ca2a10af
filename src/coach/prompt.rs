use crate::trading::AnalysisResult;

/// Marker that closes the prompt; the model's advice follows it.
pub const ADVICE_MARKER: &str = "Your helpful advice:";

pub fn build_prompt(user_message: &str, analysis: &AnalysisResult) -> String {
    format!(
        "\nAs a professional trading coach, give advice to a trader with:\n\
         - Win rate: {}%\n\
         - Average P&L: ${:.2}\n\
         - Strategies: {}\n\
         - Strengths: {}\n\
         - Weaknesses: {}\n\
         \n\
         The trader asks: \"{}\"\n\
         \n\
         {}",
        win_rate_percent(analysis.win_rate),
        analysis.avg_profit_loss,
        join_or(&analysis.strategies, "None recorded"),
        join_or(&analysis.strengths, "None identified"),
        join_or(&analysis.weaknesses, "None identified"),
        user_message,
        ADVICE_MARKER,
    )
}

/// Text after the last advice marker, trimmed. The whole text when the marker
/// is absent.
pub fn extract_advice(generated: &str) -> &str {
    generated
        .rsplit(ADVICE_MARKER)
        .next()
        .unwrap_or(generated)
        .trim()
}

/// Win rate as a percentage with one decimal, e.g. `66.7`.
pub fn win_rate_percent(win_rate: f64) -> String {
    format!("{:.1}", win_rate * 100.0)
}

pub fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
