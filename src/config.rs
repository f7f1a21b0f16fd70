use crate::validator::FieldThresholds;
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration, loaded once at process start and injected into
/// every collaborator. No credential or URL lives anywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub groq_model: String,
    pub callback_url: String,
    pub review_count: usize,
    pub faq_count: usize,
    /// Optional append-only JSON archive keyed by property id.
    pub archive_path: Option<PathBuf>,
    /// Per-field word-count sufficiency thresholds.
    pub thresholds: FieldThresholds,
}

fn env_usize(name: &str, default: usize) -> anyhow::Result<usize> {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            groq_api_key: std::env::var("GROQ_API_KEY")
                .map_err(|_| anyhow::anyhow!("GROQ_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("GROQ_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            groq_api_url: std::env::var("GROQ_API_URL")
                .unwrap_or_else(|_| {
                    "https://api.groq.com/openai/v1/chat/completions".to_string()
                }),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            callback_url: std::env::var("CALLBACK_URL")
                .map_err(|_| anyhow::anyhow!("CALLBACK_URL environment variable required"))
                .and_then(|raw| {
                    let parsed = url::Url::parse(&raw)
                        .map_err(|e| anyhow::anyhow!("CALLBACK_URL is not a valid URL: {}", e))?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("CALLBACK_URL must start with http:// or https://");
                    }
                    Ok(raw)
                })?,
            review_count: env_usize("REVIEW_COUNT", 10)?,
            faq_count: env_usize("FAQ_COUNT", 6)?,
            archive_path: std::env::var("ARCHIVE_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            thresholds: FieldThresholds {
                locality: env_usize("LOCALITY_MIN_WORDS", 150)?,
                prop_locality: env_usize("PROP_LOCALITY_MIN_WORDS", 150)?,
                property: env_usize("PROPERTY_MIN_WORDS", 250)?,
                builder_details: env_usize("BUILDER_DETAILS_MIN_WORDS", 100)?,
                builder_listing: env_usize("BUILDER_LISTING_MIN_WORDS", 100)?,
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Groq API URL: {}", config.groq_api_url);
        tracing::debug!("Groq model: {}", config.groq_model);
        tracing::debug!("Callback URL: {}", config.callback_url);
        tracing::debug!("Server Port: {}", config.port);
        if let Some(ref path) = config.archive_path {
            tracing::info!("Result archive enabled: {}", path.display());
        }

        Ok(config)
    }
}
