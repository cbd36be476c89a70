//! Text-completion provider abstraction
//!
//! Every LLM-backed feature (mood detection, keyword extraction, the
//! assistant) goes through this one seam. Callers hold an
//! `Option<Arc<dyn TextCompletion>>`: `None` means no provider was
//! configured, which is a different situation from a configured provider
//! whose call failed, and the two trigger different fallbacks.

pub mod gemini;

pub use gemini::GeminiProvider;

/// Errors a completion call can produce
///
/// These never cross the engine boundary; callers translate them into
/// fallback behavior and log them.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response contained no text")]
    Empty,
}

/// Trait for text-completion backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextCompletion: Send + Sync {
    /// Sends one prompt and returns the model's raw text answer
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
