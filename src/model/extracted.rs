//! Verdict shape as returned by the reasoning model
//!
//! Untrusted: every field is optional here and checked by the normalizer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys a reply must carry (explicit null allowed for `valid` and `error`)
pub const REQUIRED_FIELDS: [&str; 3] = ["valid", "proof", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedVerdict {
    pub valid: Option<bool>,
    pub proof: Option<Vec<ExtractedProofStep>>,
    pub mood: Option<String>,
    pub error: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedProofStep {
    /// `None` when absent or unusable; the converter falls back to the position
    #[serde(default, deserialize_with = "deserialize_step_index")]
    pub step: Option<u32>,
    pub statement: String,
    pub rule: String,
}

fn deserialize_step_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(step_index))
}

/// Step index from an integer, an integral float or a numeric string
pub fn step_index(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(u32::try_from).and_then(Result::ok).or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(|f| step_index(&Value::from(f))))
        }
        _ => None,
    }
}
