//! Converters from extracted replies to verdicts

use crate::model::extracted::{ExtractedProofStep, ExtractedVerdict};
use crate::model::{ProofStep, Verdict};
use crate::service::verdict::validation::{normalize_mood, reported_error};

/// Convert an extracted reply to a verdict, backfilling optional fields
pub fn convert_verdict(extracted: ExtractedVerdict) -> Verdict {
    let error = reported_error(&extracted).map(str::to_string);
    let mood = normalize_mood(extracted.mood.as_deref());

    let proof = extracted
        .proof
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, step)| convert_proof_step(i, step))
        .collect();

    Verdict::reasoned(
        extracted.valid,
        proof,
        mood,
        error,
        extracted.explanation.unwrap_or_default(),
    )
}

/// Missing step numbers take their 1-based position
fn convert_proof_step(index: usize, extracted: ExtractedProofStep) -> ProofStep {
    ProofStep {
        step: extracted
            .step
            .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX)),
        statement: extracted.statement.trim().to_string(),
        rule: extracted.rule.trim().to_string(),
    }
}
