//! Request pipeline for `POST /predict`:
//! validate upload, preprocess, run the engine, rank, assemble the response.

mod types;

pub use types::*;

use crate::{
    advice::Advisor,
    engine::InferenceEngine,
    labels::{ClassCatalog, parse},
    vision,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

pub const TOP_K: usize = 3;

pub const GUIDANCE_MESSAGE: &str =
    "Analysis complete. Upload a clear photo of plant leaves for best results.";

// Matched against the raw label, case-sensitive; first match wins.
const PLANT_TYPES: &[(&str, &str)] = &[
    ("Pepper", "Pepper Bell"),
    ("Potato", "Potato"),
    ("Tomato", "Tomato"),
];

const UNKNOWN_PLANT_TYPE: &str = "Unknown";

pub struct PredictionPipeline {
    engine: Option<Arc<dyn InferenceEngine>>,
    catalog: Arc<ClassCatalog>,
    advisor: Advisor,
}

impl PredictionPipeline {
    pub fn new(
        engine: Option<Arc<dyn InferenceEngine>>,
        catalog: Arc<ClassCatalog>,
        advisor: Advisor,
    ) -> Self {
        Self {
            engine,
            catalog,
            advisor,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> Result<&Arc<dyn InferenceEngine>, PredictError> {
        self.engine.as_ref().ok_or(PredictError::ModelNotLoaded)
    }

    pub async fn predict(&self, upload: Option<Upload>) -> Result<PredictionResponse, PredictError> {
        let engine = Arc::clone(self.engine()?);
        let upload = validate_upload(upload)?;

        debug!(
            "Classifying {} ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );

        let probabilities = tokio::task::spawn_blocking(move || {
            let tensor =
                vision::preprocess(&upload.bytes).map_err(|e| PredictError::Decode(e.to_string()))?;
            engine
                .predict(tensor)
                .map_err(|e| PredictError::Processing(e.to_string()))
        })
        .await
        .map_err(|e| {
            warn!("Inference task failed: {}", e);
            PredictError::Processing(format!("Inference task failed: {e}"))
        })??;

        self.assemble(&probabilities)
    }

    /// Builds the response from a probability vector over the catalog.
    pub fn assemble(&self, probabilities: &[f32]) -> Result<PredictionResponse, PredictError> {
        if probabilities.len() != self.catalog.len() {
            return Err(PredictError::Processing(format!(
                "Model returned {} probabilities for {} classes",
                probabilities.len(),
                self.catalog.len()
            )));
        }

        let ranked = rank_top_k(probabilities, TOP_K);
        let &(class_index, top_probability) = ranked
            .first()
            .ok_or_else(|| PredictError::Processing("No classes loaded".to_string()))?;

        let top_predictions = ranked
            .into_iter()
            .enumerate()
            .map(|(position, (index, probability))| {
                let label = self.label(index)?;
                Ok(PredictionResult::new(label, probability, position + 1))
            })
            .collect::<Result<Vec<_>, PredictError>>()?;
        let best = &top_predictions[0];

        let predicted = best.class_label.clone();
        let parsed = parse(&predicted);
        let confidence = best.confidence;

        Ok(PredictionResponse {
            success: true,
            display_name: parsed.display_name,
            plant: parsed.plant,
            disease: parsed.disease,
            subtype: parsed.subtype,
            plant_type: classify_plant_type(&predicted).to_string(),
            confidence,
            class_index,
            is_healthy: parsed.is_healthy,
            // Thresholded on the unrounded percentage.
            advice: self
                .advisor
                .advise(&predicted, f64::from(top_probability) * 100.0),
            message: GUIDANCE_MESSAGE.to_string(),
            top_predictions: top_predictions.into_iter().map(TopPrediction::from).collect(),
            prediction: predicted,
        })
    }

    fn label(&self, index: usize) -> Result<&str, PredictError> {
        self.catalog
            .get(index)
            .ok_or_else(|| PredictError::Processing(format!("Class index {index} out of range")))
    }
}

pub fn validate_upload(upload: Option<Upload>) -> Result<Upload, PredictError> {
    let upload = upload.ok_or(PredictError::NoFile)?;
    if upload.file_name.is_empty() {
        return Err(PredictError::NoFileSelected);
    }

    let (_, extension) = upload
        .file_name
        .rsplit_once('.')
        .ok_or(PredictError::InvalidFile)?;
    let extension = extension.to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(PredictError::UnsupportedType(extension));
    }

    Ok(upload)
}

/// Indices of the `k` largest probabilities, descending; ties keep catalog order.
pub fn rank_top_k(probabilities: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

pub fn classify_plant_type(label: &str) -> &'static str {
    PLANT_TYPES
        .iter()
        .find(|(marker, _)| label.contains(*marker))
        .map_or(UNKNOWN_PLANT_TYPE, |&(_, plant_type)| plant_type)
}
