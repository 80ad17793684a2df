mod config;
mod llm;
mod replicate;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let server = config::ServerConfig::from_lookup(&config::process_env).expect("invalid server config");

    // Initialize LLM client (non-fatal: story generation answers 503 if config missing).
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, story generation disabled");
            None
        }
    };

    let replicate_config = replicate::config::ReplicateConfig::from_env();
    if !replicate_config.has_token() {
        tracing::warn!("REPLICATE_API_TOKEN not set, image requests will be rejected upstream");
    }
    let images = replicate::ReplicateClient::new(replicate_config).expect("replicate client init failed");
    tracing::info!(version = images.model_version(), "image model configured");

    let story = services::story::StorySettings::from_env();
    let state = state::AppState::new(llm, Arc::new(images), story);

    let app = match routes::leptos_app(state.clone()) {
        Ok(router) => router,
        Err(e) => {
            tracing::warn!(error = %e, "serving API routes only");
            routes::api_routes(state)
        }
    };

    let port = server.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "lily-comics listening");
    axum::serve(listener, app).await.expect("server failed");
}
