use std::sync::Arc;
use tracing::{debug, warn};

use crate::coach::prompt::{build_prompt, extract_advice};
use crate::coach::templates::{default_reply, CoachTopic};
use crate::generation::TextGenerator;
use crate::trading::AnalysisResult;

pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const MAX_RESPONSE_CHARS: usize = 500;
const MIN_ADVICE_CHARS: usize = 10;

/// Answers a trader's question from their analysis. Uses the generator when
/// one is configured and its output is usable, templates otherwise.
#[derive(Clone)]
pub struct CoachResponder {
    generator: Option<Arc<dyn TextGenerator>>,
    max_length: usize,
}

impl CoachResponder {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, max_length: usize) -> Self {
        Self {
            generator,
            max_length,
        }
    }

    pub fn templates_only() -> Self {
        Self::new(None, DEFAULT_MAX_LENGTH)
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn respond(&self, user_message: &str, analysis: &AnalysisResult) -> String {
        if let Some(advice) = self.generated_advice(user_message, analysis).await {
            return advice;
        }

        match CoachTopic::detect(user_message) {
            Some(topic) => {
                debug!(%topic, "Answering from template");
                topic.reply(analysis)
            }
            None => {
                debug!("Answering from default template");
                default_reply(analysis)
            }
        }
    }

    async fn generated_advice(&self, user_message: &str, analysis: &AnalysisResult) -> Option<String> {
        let generator = self.generator.as_ref()?;
        let prompt = build_prompt(user_message, analysis);

        let generated = match generator.generate(&prompt, self.max_length).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation failed, using template reply: {}", e);
                return None;
            }
        };

        let advice = extract_advice(&generated);
        if advice.chars().count() < MIN_ADVICE_CHARS {
            warn!(
                "Generated advice too short ({} chars), using template reply",
                advice.chars().count()
            );
            return None;
        }

        Some(cap_chars(advice, MAX_RESPONSE_CHARS))
    }
}

fn cap_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
