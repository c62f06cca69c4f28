//! Generative model integration
//!
//! `ContentGenerator` is the seam between the inference logic and the remote
//! model. The Gemini REST implementation talks to the real endpoint; the mock
//! replays scripted answers for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiGenerator;
pub use mock::MockContentGenerator;

use crate::schema::Schema;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Send an inline image followed by `prompt`, asking for JSON output that
    /// matches `schema`. Returns the raw response text.
    async fn generate_structured(
        &self,
        mime_type: &str,
        image_base64: &str,
        prompt: &str,
        schema: &Schema,
    ) -> Result<String>;

    /// Send a text-only prompt and return the response text.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}
