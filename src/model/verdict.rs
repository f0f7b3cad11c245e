use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix carried by every verdict the system produces for its own failures
pub const SYSTEM_ERROR_PREFIX: &str = "Logic engine failure";

/// Distinguishes a reasoned outcome from a failure to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VerdictStatus {
    /// The reasoner judged the argument valid
    #[serde(rename = "ok-valid")]
    Valid,
    /// The reasoner judged the argument invalid (fallacy or malformed argument)
    #[serde(rename = "ok-invalid")]
    Invalid,
    /// The reasoner answered but could not decide validity
    #[serde(rename = "ok-undetermined")]
    Undetermined,
    /// The system could not obtain or understand a verdict
    #[serde(rename = "system-error")]
    SystemError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProofStep {
    pub step: u32,
    pub statement: String,
    /// Justifying rule, e.g. "Premise" or "Modus Ponens"
    pub rule: String,
}

/// Result of analysing one argument
///
/// - `valid`: null only when the reasoner could not finish
/// - `proof`: empty unless valid
/// - `mood`: syllogism mood code ("AAA-1") for categorical arguments
/// - `error`: fallacy name, malformed-input notice, or system failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub valid: Option<bool>,
    pub proof: Vec<ProofStep>,
    pub mood: Option<String>,
    pub error: Option<String>,
    pub explanation: String,
    pub status: VerdictStatus,
}

impl Verdict {
    /// Build a verdict from a reasoned outcome, deriving its status
    pub fn reasoned(
        valid: Option<bool>,
        proof: Vec<ProofStep>,
        mood: Option<String>,
        error: Option<String>,
        explanation: String,
    ) -> Self {
        let status = match valid {
            Some(true) => VerdictStatus::Valid,
            Some(false) => VerdictStatus::Invalid,
            None => VerdictStatus::Undetermined,
        };

        Self {
            valid,
            proof,
            mood,
            error,
            explanation,
            status,
        }
    }

    /// Verdict returned when the pipeline itself failed
    pub fn system_error(cause: impl std::fmt::Display) -> Self {
        Self {
            valid: Some(false),
            proof: Vec::new(),
            mood: None,
            error: Some(format!("{SYSTEM_ERROR_PREFIX}: {cause}")),
            explanation: String::new(),
            status: VerdictStatus::SystemError,
        }
    }
}
