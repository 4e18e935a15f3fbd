//! Class label taxonomy.
//!
//! Class ids encode plant, optional subtype and disease in one string:
//! `Tomato_Early_blight`, `Potato__Late_blight`, `Pepper__bell__Bacterial_spot`.

mod catalog;

pub use catalog::{CatalogEntry, ClassCatalog};

use serde::Serialize;

const SEPARATOR: char = '_';
const DOUBLE_SEPARATOR: &str = "__";

/// Marker segment recognised in the middle of a three-part id.
const SUBTYPE_MARKER: &str = "bell";
const SUBTYPE_LABEL: &str = "Bell";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLabel {
    pub plant: String,
    pub subtype: String,
    pub disease: String,
    pub is_healthy: bool,
    pub display_name: String,
}

pub fn parse(label: &str) -> ParsedLabel {
    let (plant, subtype, disease, display_name) = match split_segments(label) {
        Segments::Whole(name) => (name.clone(), String::new(), String::new(), name),
        Segments::Split {
            plant,
            subtype,
            disease,
        } => {
            let display_name = if subtype.is_empty() {
                format!("{plant} - {disease}")
            } else {
                format!("{plant} {subtype} - {disease}")
            };
            (plant, subtype, disease, display_name)
        }
    };

    ParsedLabel {
        plant,
        subtype,
        disease,
        is_healthy: is_healthy(label),
        display_name,
    }
}

pub fn display_name(label: &str) -> String {
    parse(label).display_name
}

pub fn is_healthy(label: &str) -> bool {
    label.to_lowercase().contains("healthy")
}

enum Segments {
    /// No plant/disease split; the name is used as-is for plant and display.
    Whole(String),
    Split {
        plant: String,
        subtype: String,
        disease: String,
    },
}

fn split_segments(label: &str) -> Segments {
    if label.contains(DOUBLE_SEPARATOR) {
        let parts: Vec<&str> = label.split(DOUBLE_SEPARATOR).collect();
        return match parts.as_slice() {
            [plant, marker, disease] => Segments::Split {
                plant: spaced(plant),
                subtype: if marker.to_lowercase().contains(SUBTYPE_MARKER) {
                    SUBTYPE_LABEL.to_string()
                } else {
                    String::new()
                },
                disease: spaced(disease),
            },
            [plant, disease] => Segments::Split {
                plant: spaced(plant),
                subtype: String::new(),
                disease: spaced(disease),
            },
            _ => Segments::Whole(spaced(label)),
        };
    }

    match label.split_once(SEPARATOR) {
        Some((plant, disease)) => Segments::Split {
            plant: spaced(plant),
            subtype: String::new(),
            disease: spaced(disease),
        },
        None => Segments::Whole(label.to_string()),
    }
}

fn spaced(segment: &str) -> String {
    segment.replace(SEPARATOR, " ")
}
