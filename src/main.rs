//! Blogdraft server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blogdraft::config::Config;
use blogdraft::db::{self, HistoryRepository};
use blogdraft::generation::{GenerateBlogUsecase, OpenAiClient};
use blogdraft::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting blogdraft server");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "LLM endpoint: {} (model {})",
        config.openai_base_url,
        config.openai_model
    );

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BLOGDRAFT_API_PSK). Authentication is disabled!");
    }
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set. Generation requests will fail.");
    }

    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(HistoryRepository::new(pool));

    let client = OpenAiClient::from_config(&config)?;
    let generator = Arc::new(GenerateBlogUsecase::new(Arc::new(client), repo.clone()));

    let state = AppState {
        repo,
        generator,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
