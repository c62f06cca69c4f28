use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::ContentGenerator;
use crate::models::Config;
use crate::schema::Schema;
use crate::{Error, Result};
use async_trait::async_trait;

/// `ContentGenerator` backed by the Gemini REST API.
pub struct GeminiGenerator {
    http: GeminiHttpClient,
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let generator = Self::new(config.api_key.clone(), config.model.clone());
        generator.with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    async fn send(&self, request: &GenerateContentRequest) -> Result<String> {
        let response: GenerateContentResponse = self.http.generate_content(request).await?;

        response.text().ok_or_else(|| {
            let reason = response.finish_reason().unwrap_or("none");
            tracing::error!("Gemini returned no text (finish reason: {})", reason);
            Error::EmptyResponse(format!(
                "No text in Gemini response (finish reason: {})",
                reason
            ))
        })
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate_structured(
        &self,
        mime_type: &str,
        image_base64: &str,
        prompt: &str,
        schema: &Schema,
    ) -> Result<String> {
        tracing::debug!(
            "Sending {} image ({} base64 bytes) to Gemini model {}",
            mime_type,
            image_base64.len(),
            self.http.model()
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema.clone()),
            }),
        };

        self.send(&request).await
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending text prompt to Gemini model {}", self.http.model());

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
        };

        self.send(&request).await
    }
}
