use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::trading::trade_record::TradeRecord;

pub const MAX_STRATEGIES: usize = 5;
pub const MAX_FINDINGS: usize = 3;
pub const DEFAULT_NOTES_SAMPLE: usize = 50;

const EMOTION_KEYWORDS: &[&str] = &["emotion", "fear", "greed"];
const PLANNING_KEYWORD: &str = "plan";

pub const EMPTY_HISTORY_SUGGESTION: &str =
    "Start recording your trades to get personalized analysis.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub win_rate: f64,
    pub avg_profit_loss: f64,
    pub strategies: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    fn empty_history() -> Self {
        Self {
            suggestions: vec![EMPTY_HISTORY_SUGGESTION.to_string()],
            ..Self::default()
        }
    }
}

/// Summarises a trader's recent history into headline stats and findings.
#[derive(Debug, Clone)]
pub struct TradeAnalyzer {
    pub notes_sample: usize,
}

impl Default for TradeAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_NOTES_SAMPLE)
    }
}

impl TradeAnalyzer {
    pub fn new(notes_sample: usize) -> Self {
        Self { notes_sample }
    }

    /// Records are expected newest first; the notes scan only looks at the
    /// leading `notes_sample` of them.
    pub fn analyze(&self, records: &[TradeRecord]) -> AnalysisResult {
        if records.is_empty() {
            return AnalysisResult::empty_history();
        }

        let total = records.len();
        let wins = records.iter().filter(|r| r.is_win()).count();
        let win_rate = wins as f64 / total as f64;
        let total_pnl: f64 = records.iter().map(|r| r.pnl).sum();
        let avg_profit_loss = total_pnl / total as f64;

        let ranked = rank_strategies(records);
        let distinct_strategies = ranked.len();

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut suggestions = Vec::new();

        if win_rate > 0.5 {
            strengths.push("Above 50% win rate".to_string());
        } else {
            weaknesses.push("Below 50% win rate".to_string());
            suggestions
                .push("Focus on improving your win rate by reviewing losing trades".to_string());
        }

        if avg_profit_loss > 0.0 {
            strengths.push("Positive average P&L".to_string());
        } else {
            weaknesses.push("Negative average P&L".to_string());
            suggestions.push("Work on improving your average profit per trade".to_string());
        }

        if distinct_strategies > 2 {
            strengths.push(format!(
                "Diverse trading approaches ({} different strategies)",
                distinct_strategies
            ));
        } else {
            suggestions.push(
                "Consider exploring more trading strategies to diversify your approach"
                    .to_string(),
            );
        }

        let notes = self.sampled_notes(records);
        if EMOTION_KEYWORDS.iter().any(|k| notes.contains(k)) {
            weaknesses.push("Emotional trading noted in multiple trades".to_string());
            suggestions.push("Work on emotional discipline during trading".to_string());
        }
        if notes.contains(PLANNING_KEYWORD) {
            strengths.push("Evidence of trade planning in notes".to_string());
        }

        let mut strategies = ranked;
        strategies.truncate(MAX_STRATEGIES);
        strengths.truncate(MAX_FINDINGS);
        weaknesses.truncate(MAX_FINDINGS);
        suggestions.truncate(MAX_FINDINGS);

        AnalysisResult {
            win_rate,
            avg_profit_loss,
            strategies,
            strengths,
            weaknesses,
            suggestions,
        }
    }

    /// Lower-cased, space-joined notes of the leading sample.
    fn sampled_notes(&self, records: &[TradeRecord]) -> String {
        records
            .iter()
            .take(self.notes_sample)
            .map(|r| r.notes.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// All distinct strategy labels, most frequent first. Ties keep the order in
/// which the label was first seen.
fn rank_strategies(records: &[TradeRecord]) -> Vec<String> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for label in records.iter().filter_map(|r| r.strategy()) {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(label, _)| label.to_string()).collect()
}
