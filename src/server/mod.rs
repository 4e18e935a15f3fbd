pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    advice::Advisor,
    config::Config,
    engine::{InferenceEngine, TractEngine},
    labels::ClassCatalog,
    pipeline::PredictionPipeline,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let app_state = load_state(&config).await?;
    let app = router(app_state, config.server.body_limit_bytes);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/classes", get(handlers::classes))
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Loads the class catalog and the model. Any failure here is fatal.
pub async fn load_state(config: &Config) -> Result<AppState> {
    let catalog = ClassCatalog::load(&config.model.classes_path).await?;

    let weights_path = config.model.weights_path.clone();
    let apply_softmax = config.model.apply_softmax;
    let engine = tokio::task::spawn_blocking(move || TractEngine::load(weights_path, apply_softmax))
        .await
        .map_err(|e| Error::model(e.to_string()))??;

    catalog.ensure_matches(engine.class_count())?;
    catalog.log_classes();

    let engine: Arc<dyn InferenceEngine> = Arc::new(engine);
    let pipeline = PredictionPipeline::new(
        Some(engine),
        Arc::new(catalog),
        Advisor::new(config.service.low_confidence_threshold),
    );

    info!("Model loaded successfully");

    Ok(AppState::new(pipeline, &config.service.dataset))
}
