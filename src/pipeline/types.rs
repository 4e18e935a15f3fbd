use crate::labels::{ParsedLabel, parse};
use serde::Serialize;
use thiserror::Error;

/// The `file` part of a predict request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("No file uploaded")]
    NoFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid file")]
    InvalidFile,

    #[error("File type .{0} not allowed")]
    UnsupportedType(String),

    #[error("Invalid upload: {0}")]
    Malformed(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Processing(String),
}

impl PredictError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NoFile
                | Self::NoFileSelected
                | Self::InvalidFile
                | Self::UnsupportedType(_)
                | Self::Malformed(_)
        )
    }
}

/// One ranked entry of the top-k list.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub class_label: String,
    pub parsed: ParsedLabel,
    pub confidence: f64,
    pub rank: usize,
}

impl PredictionResult {
    pub fn new(class_label: &str, probability: f32, rank: usize) -> Self {
        Self {
            class_label: class_label.to_string(),
            parsed: parse(class_label),
            confidence: round_confidence(probability),
            rank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPrediction {
    pub rank: usize,
    pub class: String,
    pub display_name: String,
    pub plant: String,
    pub disease: String,
    #[serde(rename = "type")]
    pub subtype: String,
    pub confidence: f64,
    pub is_healthy: bool,
}

impl From<PredictionResult> for TopPrediction {
    fn from(result: PredictionResult) -> Self {
        Self {
            rank: result.rank,
            class: result.class_label,
            display_name: result.parsed.display_name,
            plant: result.parsed.plant,
            disease: result.parsed.disease,
            subtype: result.parsed.subtype,
            confidence: result.confidence,
            is_healthy: result.parsed.is_healthy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: String,
    pub display_name: String,
    pub plant: String,
    pub disease: String,
    #[serde(rename = "type")]
    pub subtype: String,
    pub plant_type: String,
    pub confidence: f64,
    pub class_index: usize,
    pub is_healthy: bool,
    pub top_predictions: Vec<TopPrediction>,
    pub advice: String,
    pub message: String,
}

/// Probability as a percentage with two decimals.
pub fn round_confidence(probability: f32) -> f64 {
    (f64::from(probability) * 100.0 * 100.0).round() / 100.0
}
