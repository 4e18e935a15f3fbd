use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// ONNX export of the trained network.
    #[serde(default = "default_weights_path")]
    pub weights_path: String,
    /// JSON array of class names, in output order.
    #[serde(default = "default_classes_path")]
    pub classes_path: String,
    /// Set to false when the exported graph already ends in a softmax.
    #[serde(default = "default_apply_softmax")]
    pub apply_softmax: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Confidence (0-100) below which advice carries a caveat.
    #[serde(default)]
    pub low_confidence_threshold: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
            classes_path: default_classes_path(),
            apply_softmax: default_apply_softmax(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            low_confidence_threshold: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_weights_path() -> String {
    "model/plant_disease.onnx".to_string()
}

fn default_classes_path() -> String {
    "model/class_names.json".to_string()
}

fn default_apply_softmax() -> bool {
    true
}

fn default_dataset() -> String {
    "PlantVillage".to_string()
}
