//! Argument evaluation service
//!
//! Frames the argument for the reasoning model, calls it once, and converts
//! whatever comes back into a verdict. Failures never escape: they become
//! system-error verdicts.

use std::sync::Arc;
use std::time::Instant;

use crate::model::{Argument, Verdict};
use crate::service::llm::ReasoningClient;
use crate::service::verdict::normalize::normalize_reply;
use crate::service::verdict::prompts::build_reasoning_request;

pub mod converters;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod validation;

pub use error::VerdictError;

/// Service evaluating arguments through the reasoning client
#[derive(Clone)]
pub struct VerdictService {
    client: Arc<dyn ReasoningClient>,
}

impl VerdictService {
    pub fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self { client }
    }

    /// Evaluate an argument; always yields a complete verdict
    pub async fn evaluate(&self, argument: &Argument) -> Verdict {
        let start_time = Instant::now();

        match self.try_evaluate(argument).await {
            Ok(verdict) => {
                tracing::info!(
                    status = ?verdict.status,
                    mood = ?verdict.mood,
                    proof_steps = verdict.proof.len(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Argument evaluated"
                );
                verdict
            }
            Err(e) => {
                tracing::warn!(
                    stage = e.stage(),
                    error = %e,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Argument evaluation failed"
                );
                Verdict::system_error(&e)
            }
        }
    }

    /// Builder, client, normalizer; first failure wins
    pub async fn try_evaluate(&self, argument: &Argument) -> Result<Verdict, VerdictError> {
        let request = build_reasoning_request(argument);

        tracing::debug!(
            argument_length = argument.as_str().len(),
            "Dispatching argument to reasoning service"
        );

        let reply = self.client.complete(&request).await?;
        let verdict = normalize_reply(&reply)?;

        Ok(verdict)
    }
}
