use super::types::{ClassesResponse, ErrorResponse, HealthResponse, ServiceInfo};
use crate::pipeline::{PredictError, PredictionPipeline, PredictionResponse, Upload};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::Json,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{error, info, warn};
use uuid::Uuid;

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /", "This info page"),
    ("GET /health", "Health check"),
    ("GET /classes", "List all detection classes"),
    ("POST /predict", "Upload image for disease detection"),
];

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub dataset: Arc<str>,
}

impl AppState {
    pub fn new(pipeline: PredictionPipeline, dataset: &str) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            dataset: Arc::from(dataset),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    let num_classes = state.pipeline.catalog().len();

    Json(ServiceInfo {
        message: "Plant Disease Detection API".to_string(),
        dataset: format!("{} ({} selected classes)", state.dataset, num_classes),
        status: "running".to_string(),
        model_loaded: state.pipeline.is_ready(),
        num_classes,
        endpoints: ENDPOINTS
            .iter()
            .map(|(route, description)| (route.to_string(), description.to_string()))
            .collect::<BTreeMap<_, _>>(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.pipeline.is_ready(),
        classes_loaded: state.pipeline.catalog().len(),
    })
}

pub async fn classes(
    State(state): State<AppState>,
) -> Result<Json<ClassesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let catalog = state.pipeline.catalog();
    if catalog.is_empty() {
        error!("Class list requested but no classes are loaded");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Classes not loaded".to_string(),
            }),
        ));
    }

    Ok(Json(ClassesResponse {
        count: catalog.len(),
        classes: catalog.entries(),
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionResponse>, PredictError> {
    let request_id = Uuid::new_v4();
    state.pipeline.engine()?;

    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(rejection) => {
            warn!(%request_id, "Predict request is not multipart: {}", rejection);
            None
        }
    };

    match state.pipeline.predict(upload).await {
        Ok(response) => {
            info!(
                %request_id,
                "Predicted {} ({}%)", response.prediction, response.confidence
            );
            Ok(Json(response))
        }
        Err(e) if e.is_client_error() => {
            warn!(%request_id, "Rejected predict request: {}", e);
            Err(e)
        }
        Err(e) => {
            error!(%request_id, "Prediction failed: {}", e);
            Err(e)
        }
    }
}

/// Returns the first `file` field, if any.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, PredictError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PredictError::Malformed(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A part without a filename is a plain form value, not a file.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| PredictError::Malformed(e.to_string()))?;
        return Ok(Some(Upload::new(file_name, bytes.to_vec())));
    }

    Ok(None)
}
