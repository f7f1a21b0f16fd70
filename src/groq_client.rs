use crate::config::Config;
use crate::errors::AppError;
use serde_json::json;
use std::time::Duration;

/// Bounded attempt count around each completion call.
const MAX_ATTEMPTS: u32 = 5;
/// First backoff delay; doubles each retry, plus a small additive step.
const BASE_BACKOFF: Duration = Duration::from_secs(1);

/// Client for the Groq chat-completions API.
///
/// The only external text-generation dependency; treated as opaque and
/// fallible. Rate-limit (429) and server-error (5xx) responses are retried
/// with exponential backoff up to [`MAX_ATTEMPTS`]; everything else fails
/// immediately.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Groq client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: config.groq_api_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
        })
    }

    /// Sends one prompt and returns the completion text.
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String, AppError> {
        let payload = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let mut last_error = AppError::ExternalApiError("no attempt made".to_string());

        for attempt in 1..=MAX_ATTEMPTS {
            match self.request_once(&payload).await {
                Ok(text) => return Ok(text),
                Err(RequestFailure::Fatal(e)) => return Err(e),
                Err(RequestFailure::Retryable(e)) => {
                    tracing::warn!(
                        "Groq request failed (attempt {}/{}): {}",
                        attempt,
                        MAX_ATTEMPTS,
                        e
                    );
                    last_error = e;
                    if attempt < MAX_ATTEMPTS {
                        let backoff = BASE_BACKOFF * 2u32.pow(attempt - 1)
                            + Duration::from_millis(100 * attempt as u64);
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(AppError::WithContext {
            source: Box::new(last_error),
            context: format!("Groq API gave up after {} attempts", MAX_ATTEMPTS),
        })
    }

    async fn request_once(&self, payload: &serde_json::Value) -> Result<String, RequestFailure> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                // Transport errors (timeouts, resets) are worth retrying
                RequestFailure::Retryable(AppError::ExternalApiError(format!(
                    "Groq request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RequestFailure::Retryable(AppError::ExternalApiError(
                format!("Groq returned status {}: {}", status, body),
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RequestFailure::Fatal(AppError::ExternalApiError(format!(
                "Groq returned status {}: {}",
                status, body
            ))));
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            RequestFailure::Fatal(AppError::ExternalApiError(format!(
                "Failed to parse Groq response: {}",
                e
            )))
        })?;

        data.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| {
                RequestFailure::Fatal(AppError::ExternalApiError(
                    "Groq response missing choices[0].message.content".to_string(),
                ))
            })
    }
}

enum RequestFailure {
    Retryable(AppError),
    Fatal(AppError),
}
