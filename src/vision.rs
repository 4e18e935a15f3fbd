//! Image decoding and normalization into the network's input layout.

use crate::Result;
use image::imageops::{self, FilterType};
use tract_onnx::prelude::tract_ndarray::Array4;

/// NCHW input, batch of one.
pub type ImageTensor = Array4<f32>;

pub const INPUT_SIZE: usize = 224;

/// Training-time channel statistics (R, G, B).
pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let resized = imageops::resize(
        &rgb,
        INPUT_SIZE as u32,
        INPUT_SIZE as u32,
        FilterType::Triangle,
    );

    Ok(Array4::from_shape_fn(
        (1, 3, INPUT_SIZE, INPUT_SIZE),
        |(_, c, y, x)| {
            let value = resized[(x as u32, y as u32)][c] as f32 / 255.0;
            (value - CHANNEL_MEAN[c]) / CHANNEL_STD[c]
        },
    ))
}
