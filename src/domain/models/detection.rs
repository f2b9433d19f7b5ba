#[cfg(test)]
#[path = "detection_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A labeled finding returned by the image analysis step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class: String,
    /// Between 0 and 1.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl Detection {
    pub fn new(class: &str, confidence: f64) -> Detection {
        return Detection {
            class: class.to_string(),
            confidence,
            bbox: None,
        };
    }

    /// Confidence as a percentage with a single decimal, `0.873` becomes
    /// `87.3%`.
    pub fn confidence_percent(&self) -> String {
        return format!("{:.1}%", self.confidence * 100.0);
    }
}
