pub mod gemini;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A text-generation backend: one prompt in, one generated text out.
///
/// The submission pipeline depends on this seam rather than on a concrete
/// client, so a submission can run against a stub in tests.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
