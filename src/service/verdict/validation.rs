//! Validation of reasoning replies
//!
//! Flags sloppy or self-contradictory replies. Findings are only logged:
//! a reply that matches the schema is always kept as the reasoner's verdict.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::extracted::ExtractedVerdict;
use crate::service::verdict::prompts::is_permitted_rule;

/// Categorical syllogism mood code, e.g. "AAA-1"
static MOOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[AEIO]{3}-[1-4]$").expect("valid mood pattern"));

/// Result of reply validation
#[derive(Debug, Default)]
pub struct VerdictValidationResult {
    /// Warnings that indicate potential quality issues
    pub warnings: Vec<String>,
}

impl VerdictValidationResult {
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Normalize a mood code, or `None` if it is not a well-formed code
pub fn normalize_mood(mood: Option<&str>) -> Option<String> {
    let mood = mood?.trim().to_ascii_uppercase();
    MOOD_PATTERN.is_match(&mood).then_some(mood)
}

/// Reported error text, ignoring blanks
pub fn reported_error(extracted: &ExtractedVerdict) -> Option<&str> {
    extracted
        .error
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
}

/// Validate an extracted reply
///
/// Warnings:
/// 1. Valid verdict that still reports an error (placeholders such as "None" included)
/// 2. Valid verdict without a proof
/// 3. Invalid verdict without an error or fallacy
/// 4. Proof steps citing rules outside the permitted set
/// 5. Malformed mood codes (these are dropped)
pub fn validate_extracted_verdict(extracted: &ExtractedVerdict) -> VerdictValidationResult {
    let mut result = VerdictValidationResult::default();
    let proof = extracted.proof.as_deref().unwrap_or_default();
    let error = reported_error(extracted);

    match extracted.valid {
        Some(true) => {
            if let Some(error) = error {
                result.add_warning(format!(
                    "Valid verdict also reports an error: '{}'",
                    error.chars().take(80).collect::<String>()
                ));
            }
            if proof.is_empty() {
                result.add_warning("Valid verdict has no proof steps".to_string());
            }
        }
        Some(false) if error.is_none() => {
            result.add_warning("Invalid verdict does not name an error or fallacy".to_string());
        }
        _ => {}
    }

    for (i, step) in proof.iter().enumerate() {
        if !is_permitted_rule(&step.rule) {
            result.add_warning(format!(
                "Proof step {} cites unrecognized rule '{}'",
                i + 1,
                step.rule
            ));
        }
        if step.statement.trim().is_empty() {
            result.add_warning(format!("Proof step {} has an empty statement", i + 1));
        }
    }

    if let Some(mood) = extracted.mood.as_deref()
        && normalize_mood(Some(mood)).is_none()
    {
        result.add_warning(format!("Dropping malformed mood '{}'", mood));
    }

    result
}
