use crate::{labels::CatalogEntry, pipeline::PredictError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub dataset: String,
    pub status: String,
    pub model_loaded: bool,
    pub num_classes: usize,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub classes_loaded: usize,
}

#[derive(Debug, Serialize)]
pub struct ClassesResponse {
    pub count: usize,
    pub classes: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure body for `POST /predict`.
#[derive(Debug, Serialize)]
pub struct PredictFailure {
    pub success: bool,
    pub error: String,
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let body = PredictFailure {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
