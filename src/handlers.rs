use crate::archive::ResultArchive;
use crate::callback_client::CallbackClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::groq_client::GroqClient;
use crate::models::{ContentPayload, IncomingPropertyData};
use crate::pipeline;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the text-generation collaborator (optional: the service
    /// degrades to fallback content when absent).
    pub groq: Option<GroqClient>,
    /// Client for the company callback endpoint.
    pub callback: CallbackClient,
    /// Optional JSON result archive.
    pub archive: Option<ResultArchive>,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "property-content-api",
            "version": "0.1.0",
            "groq_ready": state.groq.is_some(),
            "callback_api": state.config.callback_url,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Service descriptor, mirroring the callback payload contract.
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "service": "Property Content Generator API",
        "status": "operational",
        "mode": "API-driven with formatted output",
        "output_format": {
            "propid": "string",
            "prop_name": "string",
            "prop_desc": "<p>content in paragraph tags</p>",
            "localityid": "string",
            "locality_desc": "string",
            "prop_locality_desc": "string",
            "builderid": "string",
            "builder_desc_details": "string",
            "builder_desc_listing": "string",
            "reviews": "array",
            "FAQ": "array",
            "error_note": "string|null"
        },
        "callback_api": state.config.callback_url,
    }))
}

/// POST /process-property
///
/// Primary endpoint: validates the inbound payload and processes it in a
/// fire-and-forget background task. Always answers HTTP 200 — acceptance
/// state travels inside the body (`accepted: true|false`) so protocol
/// errors never surface to the caller as 4xx/5xx.
pub async fn process_property(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request_id = format!("req_{}", uuid::Uuid::new_v4().simple());

    let body_value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            let preview: String = String::from_utf8_lossy(&body).chars().take(500).collect();
            tracing::warn!("⚠ Could not parse JSON. Raw data: {}", preview);
            return (
                StatusCode::OK,
                Json(json!({
                    "status": true,
                    "accepted": false,
                    "message": "Invalid JSON payload",
                    "errors": e.to_string(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "request_id": request_id,
                })),
            );
        }
    };

    tracing::info!(
        "📥 Received data for: {}",
        body_value
            .pointer("/prop_info/0/propertyName")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
    );

    let schema_check = serde_json::from_value::<IncomingPropertyData>(body_value.clone())
        .map_err(|e| e.to_string())
        .and_then(|data| data.validate().map_err(|e| e.to_string()));

    match schema_check {
        Ok(()) => {
            tracing::info!("✓ Schema validation successful");
            pipeline::spawn_processing_job(state, body_value);
            (
                StatusCode::OK,
                Json(json!({
                    "status": true,
                    "accepted": true,
                    "message": "Request received and data format is valid. Processing in background.",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "request_id": request_id,
                })),
            )
        }
        Err(errors) => {
            tracing::warn!("❌ Schema validation failed: {}", errors);
            (
                StatusCode::OK,
                Json(json!({
                    "status": true,
                    "accepted": false,
                    "message": "Payload did not match required format.",
                    "errors": errors,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "request_id": request_id,
                })),
            )
        }
    }
}

fn parse_payload(body: &Bytes) -> Result<IncomingPropertyData, AppError> {
    let data: IncomingPropertyData = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid payload: {}", e)))?;
    data.validate()?;
    Ok(data)
}

/// POST /generate-manual
///
/// Debug endpoint: runs the full assembly synchronously and returns the
/// formatted output without touching the callback API.
pub async fn generate_manual(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ContentPayload>, AppError> {
    let data = parse_payload(&body)?;
    let payload = pipeline::assemble_content(&state, &data).await;
    Ok(Json(payload))
}

/// POST /test-callback
///
/// Debug endpoint: returns what would be sent to the callback API,
/// without actually sending it.
pub async fn test_callback(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let data = parse_payload(&body)?;
    let payload = pipeline::assemble_content(&state, &data).await;
    let serialized = serde_json::to_string(&payload)?;

    Ok(Json(json!({
        "message": "This is what would be sent to the callback API",
        "callback_api": state.config.callback_url,
        "payload": payload,
        "payload_size_bytes": serialized.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
