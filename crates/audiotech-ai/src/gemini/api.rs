//! AiClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, ChatRequest};

use super::client::GeminiClient;

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_message(&self, request: &ChatRequest<'_>) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(request);
        let url = self.api_url();

        debug!(
            model = %self.config.model,
            turns = request.contents.len(),
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn check_model(&self) -> Result<(), AiError> {
        if !self.config.has_api_key() {
            return Err(AiError::NotConfigured("Gemini API key is empty".into()));
        }
        if !self.config.verify_model {
            return Ok(());
        }

        debug!(model = %self.config.model, "Gemini model lookup");

        let response = self
            .http
            .get(self.model_url())
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }
        Ok(())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
