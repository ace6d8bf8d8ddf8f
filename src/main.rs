use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use report_moderation::{
    config::init_config,
    handlers::{router, AppState},
    reports_memory::InMemoryReports,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report_moderation=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🔧 Initializing configuration from environment variables...");
    let config = init_config().map_err(|e| anyhow::anyhow!("Failed to initialize config: {}", e))?;
    tracing::info!("✅ Configuration loaded successfully");
    tracing::debug!("Update mode: {:?}", config.update_mode);

    let reports_memory = if config.seed_mock_reports {
        tracing::info!("📥 Loading mock reports into in-memory storage...");
        InMemoryReports::seeded().map_err(|e| anyhow::anyhow!("Failed to seed reports: {}", e))?
    } else {
        InMemoryReports::new()
    };
    tracing::info!("✅ {} reports in memory", reports_memory.len());

    let state = AppState {
        reports: Arc::new(reports_memory),
        update_mode: config.update_mode,
        service_name: config.service_name.clone(),
    };

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    tracing::info!("🚀 {} server starting on http://0.0.0.0:{}", config.service_name, config.http_port);

    axum::serve(listener, app).await?;

    Ok(())
}
