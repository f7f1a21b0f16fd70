use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CallbackResult, ContentPayload};
use std::time::Duration;

/// Client for the company callback endpoint that receives the assembled
/// content payload.
///
/// Delivery is a single attempt: the outcome (success or failure, status,
/// body) is captured into a [`CallbackResult`] and reported back rather
/// than retried or raised.
#[derive(Clone)]
pub struct CallbackClient {
    client: reqwest::Client,
    url: String,
}

impl CallbackClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create callback client: {}", e))
            })?;

        Ok(Self {
            client,
            url: config.callback_url.clone(),
        })
    }

    /// Delivers the full payload as a form-encoded POST.
    ///
    /// List fields (`reviews`, `FAQ`) are serialized to JSON strings inside
    /// their form fields; absent scalars become empty strings.
    pub async fn deliver(&self, payload: &ContentPayload) -> CallbackResult {
        let fields = form_fields(payload);
        tracing::info!(
            "Sending payload to callback API: {} ({} fields)",
            self.url,
            fields.len()
        );
        self.post_form(&fields).await
    }

    /// Best-effort minimal notification used when processing failed before
    /// a full payload existed. Carries just the error text and whatever
    /// identifying fields are available.
    pub async fn deliver_minimal(
        &self,
        propid: Option<&str>,
        prop_name: Option<&str>,
        error_note: &str,
    ) -> CallbackResult {
        let fields = vec![
            ("propid", propid.unwrap_or("").to_string()),
            ("prop_name", prop_name.unwrap_or("").to_string()),
            ("error_note", error_note.to_string()),
        ];
        tracing::warn!("Sending minimal failure notification to callback API");
        self.post_form(&fields).await
    }

    async fn post_form(&self, fields: &[(&'static str, String)]) -> CallbackResult {
        match self.client.post(&self.url).form(fields).send().await {
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                let preview: String = body.chars().take(500).collect();
                if status.is_success() {
                    tracing::info!("✓ Callback API responded {}", status);
                } else {
                    tracing::error!("Callback API returned {}: {}", status, preview);
                }
                CallbackResult {
                    ok: status.is_success(),
                    status_code: Some(status.as_u16()),
                    response_text: Some(preview),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Callback delivery failed: {}", e);
                CallbackResult {
                    ok: false,
                    status_code: None,
                    response_text: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn form_fields(payload: &ContentPayload) -> Vec<(&'static str, String)> {
    let scalar = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        ("propid", scalar(&payload.propid)),
        ("prop_name", scalar(&payload.prop_name)),
        ("prop_desc", scalar(&payload.prop_desc)),
        ("localityid", scalar(&payload.localityid)),
        ("locality_desc", scalar(&payload.locality_desc)),
        ("prop_locality_desc", scalar(&payload.prop_locality_desc)),
        ("builderid", scalar(&payload.builderid)),
        (
            "builder_desc_details",
            scalar(&payload.builder_desc_details),
        ),
        (
            "builder_desc_listing",
            scalar(&payload.builder_desc_listing),
        ),
        (
            "reviews",
            serde_json::to_string(&payload.reviews).unwrap_or_else(|_| "[]".to_string()),
        ),
        (
            "FAQ",
            serde_json::to_string(&payload.faq).unwrap_or_else(|_| "[]".to_string()),
        ),
        ("error_note", scalar(&payload.error_note)),
    ]
}
