//! OpenAI-compatible chat completions client.
//!
//! Posts to `{base_url}/chat/completions`, so it works against OpenAI and
//! any server exposing the same API (Ollama, vLLM, LM Studio).
//!
//! # Retry Strategy
//!
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors and timeouts → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)
//!
//! Every request is bounded by `llm.timeout_secs`. A request that exhausts
//! its retries returns an ordinary error.

use anyhow::{bail, Result};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::LlmConfig;

/// Text and vision completion over one HTTP client.
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    vision_model: String,
    api_key: Option<String>,
    max_retries: u32,
    timeout_secs: u64,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            vision_model: config.vision_model().to_string(),
            api_key: config.api_key(),
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
            temperature: config.temperature,
        })
    }

    /// Single-turn text completion.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages = json!([
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ]);
        self.chat(&self.model, messages).await
    }

    /// Completion over a prompt plus one image, using the vision model.
    pub async fn complete_with_image(&self, prompt: &str, image_url: &str) -> Result<String> {
        let messages = json!([
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image_url } },
                ],
            },
        ]);
        self.chat(&self.vision_model, messages).await
    }

    async fn chat(&self, model: &str, messages: Value) -> Result<String> {
        let body = json!({
            "model": model,
            "messages": messages,
            "temperature": self.temperature,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, 8s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tracing::warn!(attempt, ?delay, "retrying chat completion");
                tokio::time::sleep(delay).await;
            }

            let mut request = self.http.post(&self.endpoint).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: Value = response.json().await?;
                        return parse_chat_response(&json);
                    }

                    // Rate limited or server error: retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err = Some(anyhow::anyhow!("LLM API error {}: {}", status, body_text));
                        continue;
                    }

                    // Client error (not 429): no retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("LLM API error {}: {}", status, body_text);
                }
                Err(e) if e.is_timeout() => {
                    last_err = Some(anyhow::anyhow!(
                        "LLM request timed out after {}s",
                        self.timeout_secs
                    ));
                }
                Err(e) => {
                    last_err = Some(e.into());
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("LLM request failed after retries")))
    }
}

/// Extract `choices[0].message.content` from a chat completions response.
pub fn parse_chat_response(json: &Value) -> Result<String> {
    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid chat response: missing choices[0].message.content"))?;

    if content.trim().is_empty() {
        bail!("Invalid chat response: empty content");
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_response() {
        let json = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Buy the HP." } }]
        });
        assert_eq!(parse_chat_response(&json).unwrap(), "Buy the HP.");
    }

    #[test]
    fn test_parse_missing_choices() {
        assert!(parse_chat_response(&json!({ "error": "nope" })).is_err());
        assert!(parse_chat_response(&json!({ "choices": [] })).is_err());
    }

    #[test]
    fn test_parse_empty_content() {
        let json = json!({ "choices": [{ "message": { "content": "   " } }] });
        assert!(parse_chat_response(&json).is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let cfg: LlmConfig = toml::from_str(
            r#"
base_url = "http://localhost:11434/v1/"
model = "llama3.2"
api_key_env = "SHOPWISE_TEST_UNSET_KEY"
"#,
        )
        .unwrap();
        let client = LlmClient::new(&cfg).unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434/v1/chat/completions");
        assert!(client.api_key.is_none());
        assert_eq!(client.vision_model, "llama3.2");
    }
}
