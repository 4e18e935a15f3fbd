mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;
    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not a map.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.server.body_limit_bytes == 0 {
        return Err(Error::config("server.body_limit_bytes must be greater than zero"));
    }
    if let Some(threshold) = config.service.low_confidence_threshold {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(Error::config(format!(
                "service.low_confidence_threshold must be between 0 and 100, got {}",
                threshold
            )));
        }
    }
    Ok(())
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("MODEL_PATH") {
        config.model.weights_path = path;
    }
    if let Ok(path) = env::var("CLASS_NAMES_PATH") {
        config.model.classes_path = path;
    }
}
