pub mod advice;
pub mod config;
pub mod engine;
pub mod error;
pub mod labels;
pub mod pipeline;
pub mod server;
pub mod vision;

pub use error::{Error, Result};
