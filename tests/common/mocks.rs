use leaf_doctor::{
    Error, Result,
    engine::InferenceEngine,
    vision::{INPUT_SIZE, ImageTensor},
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine returning a fixed probability vector
#[derive(Debug)]
pub struct StubEngine {
    pub probabilities: Vec<f32>,
    calls: AtomicUsize,
}

impl StubEngine {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self {
            probabilities,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceEngine for StubEngine {
    fn class_count(&self) -> usize {
        self.probabilities.len()
    }

    fn predict(&self, input: ImageTensor) -> Result<Vec<f32>> {
        assert_eq!(input.shape(), &[1, 3, INPUT_SIZE, INPUT_SIZE]);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.probabilities.clone())
    }
}

/// Engine whose forward pass always fails
#[derive(Debug)]
pub struct FailingEngine {
    pub class_count: usize,
    pub message: String,
}

impl InferenceEngine for FailingEngine {
    fn class_count(&self) -> usize {
        self.class_count
    }

    fn predict(&self, _input: ImageTensor) -> Result<Vec<f32>> {
        Err(Error::inference(self.message.clone()))
    }
}

/// Engine that panics mid-request
#[derive(Debug)]
pub struct PanickingEngine;

impl InferenceEngine for PanickingEngine {
    fn class_count(&self) -> usize {
        3
    }

    fn predict(&self, _input: ImageTensor) -> Result<Vec<f32>> {
        panic!("forward pass blew up");
    }
}
