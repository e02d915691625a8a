mod choice;
mod error;
mod prompt;

pub use choice::{ModelChoice, ModelError, CUSTOM};
pub use error::InferenceError;
pub use prompt::PromptRequest;

use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use crate::conversation::Turn;

/// Client for Ollama's `/api/generate` endpoint.
pub struct OllamaClient {
    endpoint: String,
    client: Client,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        info!("Using Ollama server at: {}", endpoint);

        // No timeout: a hung server blocks the exchange
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    /// Builds the prompt from `history` plus the new user text and asks the
    /// model for a continuation. One request, no retry.
    pub async fn generate(
        &self,
        history: &[Turn],
        user_text: &str,
        model: &str,
    ) -> Result<String, InferenceError> {
        let prompt = PromptRequest::build(history, user_text);
        info!(
            "Generating response with model {} (prompt: {} chars, {} earlier turns)",
            model,
            prompt.as_str().len(),
            history.len()
        );
        debug!("Prompt: {}", prompt.as_str());

        let payload = json!({
            "model": model,
            "prompt": prompt.as_str(),
            "stream": false
        });
        debug!("Payload: {}", payload);

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(InferenceError::status(status, &body));
        }

        let response_json: Value = serde_json::from_str(&body)
            .map_err(|e| InferenceError::malformed(format!("invalid JSON body: {}", e)))?;
        debug!("Response JSON: {}", response_json);

        let content = response_json
            .get("response")
            .and_then(|content| content.as_str())
            .ok_or_else(|| InferenceError::malformed("response body has no 'response' field"))?
            .trim();

        if content.is_empty() {
            return Err(InferenceError::empty_reply());
        }

        info!("Response length: {} characters", content.len());
        Ok(content.to_string())
    }
}
