use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::generation::{GenerationError, TextGenerator};

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: usize,
    num_return_sequences: u32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct GenerationOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedSequence {
    generated_text: String,
}

/// Client for the Hugging Face Inference API text-generation task.
pub struct HuggingFaceGenerator {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceGenerator {
    pub fn new(cfg: &Config) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;

        let api_token = if cfg.hf_api_token.is_empty() {
            None
        } else {
            Some(cfg.hf_api_token.clone())
        };

        Ok(Self {
            client,
            endpoint: format!("{}/models/{}", cfg.hf_api_url, cfg.hf_model.trim()),
            api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<String, GenerationError> {
        let body = request_body(prompt, max_length);

        debug!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.len(),
            max_length,
            "Requesting completion"
        );

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        first_sequence(&text)
    }
}

fn request_body(prompt: &str, max_length: usize) -> GenerationRequest<'_> {
    GenerationRequest {
        inputs: prompt,
        parameters: GenerationParameters {
            max_length,
            num_return_sequences: 1,
            return_full_text: true,
        },
        options: GenerationOptions {
            wait_for_model: true,
        },
    }
}

fn first_sequence(body: &str) -> Result<String, GenerationError> {
    let sequences: Vec<GeneratedSequence> =
        serde_json::from_str(body).map_err(|e| GenerationError::Decode(e.to_string()))?;

    sequences
        .into_iter()
        .next()
        .map(|s| s.generated_text)
        .ok_or(GenerationError::EmptyResponse)
}
