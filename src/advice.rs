//! Care advice for a predicted class.

struct AdviceRule {
    marker: &'static str,
    advice: &'static str,
}

// Evaluated top to bottom against the lowercased label; first match wins.
const RULES: &[AdviceRule] = &[
    AdviceRule {
        marker: "healthy",
        advice: "Your plant appears healthy! Continue regular care and monitoring.",
    },
    AdviceRule {
        marker: "bacterial_spot",
        advice: "Bacterial spot detected. Remove infected leaves, avoid overhead watering, and consider copper-based fungicides.",
    },
    AdviceRule {
        marker: "early_blight",
        advice: "Early blight detected. Remove infected leaves, improve air circulation, and apply fungicide containing chlorothalonil.",
    },
    AdviceRule {
        marker: "late_blight",
        advice: "Late blight detected. Remove and destroy infected plants immediately. Apply copper-based fungicides preventatively.",
    },
    AdviceRule {
        marker: "spider_mites",
        advice: "Spider mites detected. Spray plants with water to dislodge mites, use insecticidal soap, or neem oil.",
    },
];

const DEFAULT_ADVICE: &str = "Disease detected. Isolate the plant, remove infected parts, and consider appropriate fungicide treatment.";

const LOW_CONFIDENCE_CAVEAT: &str =
    "Confidence is low; retake the photo in good light or confirm with a local extension service.";

/// Advice text for `label`. `confidence` (0-100) does not affect which rule matches.
pub fn advise(label: &str, _confidence: f64) -> &'static str {
    let label = label.to_lowercase();
    RULES
        .iter()
        .find(|rule| label.contains(rule.marker))
        .map_or(DEFAULT_ADVICE, |rule| rule.advice)
}

/// Wraps [`advise`] with an optional low-confidence caveat.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advisor {
    low_confidence_threshold: Option<f64>,
}

impl Advisor {
    pub fn new(low_confidence_threshold: Option<f64>) -> Self {
        Self {
            low_confidence_threshold,
        }
    }

    pub fn advise(&self, label: &str, confidence: f64) -> String {
        let advice = advise(label, confidence);
        match self.low_confidence_threshold {
            Some(threshold) if confidence < threshold => {
                format!("{advice} {LOW_CONFIDENCE_CAVEAT}")
            }
            _ => advice.to_string(),
        }
    }
}
