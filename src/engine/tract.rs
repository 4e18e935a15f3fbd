use super::{InferenceEngine, softmax};
use crate::{
    Error, Result,
    vision::{INPUT_SIZE, ImageTensor},
};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type Plan = TypedRunnableModel<TypedModel>;

/// ONNX export of the classifier, run on CPU by tract.
pub struct TractEngine {
    plan: Plan,
    class_count: usize,
    apply_softmax: bool,
}

impl TractEngine {
    pub fn load(path: impl AsRef<Path>, apply_softmax: bool) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::model(format!(
                "weights artifact not found: {}",
                path.display()
            )));
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, 3, INPUT_SIZE, INPUT_SIZE]).into())
            })
            .and_then(|model| model.into_optimized())
            .map_err(|e| Error::model(format!("failed to load {}: {}", path.display(), e)))?;

        let class_count = model
            .output_fact(0)
            .ok()
            .and_then(|fact| fact.shape.as_concrete().and_then(|dims| dims.last().copied()))
            .ok_or_else(|| Error::model("output 0 has no concrete class dimension"))?;

        let plan = model
            .into_runnable()
            .map_err(|e| Error::model(e.to_string()))?;

        info!(
            "Model loaded from {} ({} classes)",
            path.display(),
            class_count
        );

        Ok(Self {
            plan,
            class_count,
            apply_softmax,
        })
    }
}

impl InferenceEngine for TractEngine {
    fn class_count(&self) -> usize {
        self.class_count
    }

    fn predict(&self, input: ImageTensor) -> Result<Vec<f32>> {
        let input: Tensor = input.into();
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| Error::inference(e.to_string()))?;

        let scores: Vec<f32> = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| Error::inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        if scores.len() != self.class_count {
            return Err(Error::inference(format!(
                "model produced {} scores, expected {}",
                scores.len(),
                self.class_count
            )));
        }

        debug!("Forward pass produced {} scores", scores.len());

        Ok(if self.apply_softmax {
            softmax(&scores)
        } else {
            scores
        })
    }
}
