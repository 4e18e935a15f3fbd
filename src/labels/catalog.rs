use super::{ParsedLabel, parse};
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Ordered class names; index `i` is output `i` of the network.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    labels: Vec<String>,
}

/// One row of `GET /classes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub display: String,
    pub plant: String,
    pub disease: String,
    #[serde(rename = "type")]
    pub subtype: String,
    pub is_healthy: bool,
}

impl From<&str> for CatalogEntry {
    fn from(label: &str) -> Self {
        let ParsedLabel {
            plant,
            subtype,
            disease,
            is_healthy,
            display_name,
        } = parse(label);

        Self {
            id: label.to_string(),
            display: display_name,
            plant,
            disease,
            subtype,
            is_healthy,
        }
    }
}

impl ClassCatalog {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Reads a JSON array of strings.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::catalog(format!("{} not found", path.display())));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let labels: Vec<String> = serde_json::from_str(&content)?;
        info!("Loaded {} class names from {}", labels.len(), path.display());

        Ok(Self::new(labels))
    }

    pub fn ensure_matches(&self, class_count: usize) -> Result<()> {
        if self.labels.len() != class_count {
            return Err(Error::CatalogMismatch {
                catalog: self.labels.len(),
                model: class_count,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.iter().map(CatalogEntry::from).collect()
    }

    pub fn log_classes(&self) {
        for (index, label) in self.iter().enumerate() {
            info!("Class {}: {}", index, super::display_name(label));
        }
    }
}
