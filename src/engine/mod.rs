mod tract;

pub use tract::TractEngine;

use crate::{Result, vision::ImageTensor};

/// A loaded classifier. Shared read-only across requests.
pub trait InferenceEngine: Send + Sync {
    fn class_count(&self) -> usize;

    /// Returns a probability distribution of length [`class_count`](Self::class_count).
    fn predict(&self, input: ImageTensor) -> Result<Vec<f32>>;
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
