pub mod huggingface;

pub use huggingface::HuggingFaceGenerator;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode generation response: {0}")]
    Decode(String),
    #[error("generation backend returned no sequences")]
    EmptyResponse,
}

/// A text-completion backend. Implementations must tolerate concurrent calls
/// through a shared reference.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt`, bounding prompt plus completion to `max_length`
    /// tokens. The returned text may include the prompt itself.
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<String, GenerationError>;
}
