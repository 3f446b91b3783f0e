pub mod gemini;
pub mod response;

use crate::domain::error::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// Seam for the suggestion model so use cases stay testable offline.
#[async_trait]
pub trait LlmClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}
