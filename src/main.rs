use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_content_api::archive::ResultArchive;
use property_content_api::callback_client::CallbackClient;
use property_content_api::config::Config;
use property_content_api::{groq_client, handlers};

/// Main entry point for the application.
///
/// Initializes logging and configuration, builds the external clients and
/// HTTP routes (with CORS, rate limiting and request size limits), then
/// starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_content_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize the text-generation client. The service stays up without
    // it; generation degrades to deterministic fallback content.
    let groq = match groq_client::GroqClient::new(&config) {
        Ok(client) => {
            tracing::info!("✓ Groq client initialized: {}", config.groq_api_url);
            Some(client)
        }
        Err(e) => {
            tracing::error!("Failed to initialize Groq client: {}", e);
            None
        }
    };

    // Callback client is mandatory: without it results go nowhere.
    let callback = CallbackClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize callback client: {}", e))?;
    tracing::info!("✓ Callback client initialized: {}", config.callback_url);

    let archive = config.archive_path.clone().map(ResultArchive::new);

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        groq,
        callback,
        archive,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/process-property", post(handlers::process_property))
        .route("/generate-manual", post(handlers::generate_manual))
        .route("/test-callback", post(handlers::test_callback))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 5MB max payload (prevents memory exhaustion)
                .layer(RequestBodyLimitLayer::new(5 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
