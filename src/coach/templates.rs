use std::fmt;

use crate::coach::prompt::{join_or, win_rate_percent};
use crate::trading::AnalysisResult;

/// Canned questions the coach can answer without a generator, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachTopic {
    Performance,
    Improvements,
    Strengths,
    Weaknesses,
}

impl CoachTopic {
    pub const ALL: [CoachTopic; 4] = [
        CoachTopic::Performance,
        CoachTopic::Improvements,
        CoachTopic::Strengths,
        CoachTopic::Weaknesses,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CoachTopic::Performance => "how am i doing",
            CoachTopic::Improvements => "what should i improve",
            CoachTopic::Strengths => "what are my strengths",
            CoachTopic::Weaknesses => "what are my weaknesses",
        }
    }

    /// First topic whose key occurs in the message, ignoring case.
    pub fn detect(message: &str) -> Option<CoachTopic> {
        let lowered = message.to_lowercase();
        Self::ALL.into_iter().find(|t| lowered.contains(t.key()))
    }

    pub fn reply(&self, analysis: &AnalysisResult) -> String {
        let pct = win_rate_percent(analysis.win_rate);
        let avg = analysis.avg_profit_loss;

        match self {
            CoachTopic::Performance => {
                let verdict = if avg > 0.0 {
                    "Your consistent positive results show good trading discipline."
                } else {
                    "Focus on improving your risk management to achieve positive results."
                };
                format!(
                    "Based on your trading metrics, you have a {}% win rate with an average P&L of ${:.2}. {}",
                    pct, avg, verdict
                )
            }
            CoachTopic::Improvements => format!(
                "Based on your trading data, I recommend: {}",
                join_or(
                    &analysis.suggestions,
                    "Keeping detailed notes on each trade to identify patterns."
                )
            ),
            CoachTopic::Strengths => format!(
                "Your trading strengths include: {}",
                join_or(
                    &analysis.strengths,
                    "Not enough data to determine specific strengths yet."
                )
            ),
            CoachTopic::Weaknesses => format!(
                "Areas for improvement include: {}",
                join_or(
                    &analysis.weaknesses,
                    "Not enough data to determine specific weaknesses yet."
                )
            ),
        }
    }
}

impl fmt::Display for CoachTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Reply used when no topic matches.
pub fn default_reply(analysis: &AnalysisResult) -> String {
    format!(
        "Based on your trading history with a {}% win rate and ${:.2} average P&L, \
         I recommend focusing on consistency and keeping detailed trade notes.",
        win_rate_percent(analysis.win_rate),
        analysis.avg_profit_loss
    )
}

/// Template answer for `message`: the matching topic's reply, or the default.
pub fn template_reply(message: &str, analysis: &AnalysisResult) -> String {
    match CoachTopic::detect(message) {
        Some(topic) => topic.reply(analysis),
        None => default_reply(analysis),
    }
}
