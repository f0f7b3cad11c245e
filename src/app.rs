//! Application state and service initialization
//!
//! Builds the reasoning client and verdict service once from the immutable
//! configuration; handlers only ever read from this state.

use std::sync::Arc;

use actix_web::web;

use crate::api::error::json_error_handler;
use crate::model::{Config, LimitsConfig};
use crate::service::{ChatCompletionsClient, VerdictService};

/// Shared, read-only state handed to every worker
#[derive(Clone)]
pub struct AppState {
    /// Argument evaluation service
    pub verdict_service: web::Data<VerdictService>,
    /// Request size limits
    pub limits: web::Data<LimitsConfig>,
}

impl AppState {
    /// Initialize services from configuration
    ///
    /// Requires OPENROUTER_API_KEY; a missing credential is a startup error
    /// rather than a per-request failure.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let api_key = config
            .reasoning
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfig("OPENROUTER_API_KEY"))?;

        let client = ChatCompletionsClient::new(api_key, &config.reasoning)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        tracing::info!(
            model = %client.model(),
            endpoint = %client.endpoint(),
            timeout_secs = config.reasoning.timeout_secs,
            "Reasoning client initialized"
        );

        Ok(Self {
            verdict_service: web::Data::new(VerdictService::new(Arc::new(client))),
            limits: web::Data::new(config.limits.clone()),
        })
    }

    /// Register state, extractor limits and routes on an app
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.verdict_service.clone())
            .app_data(self.limits.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(self.limits.max_body_bytes)
                    .error_handler(json_error_handler),
            )
            .configure(crate::api::configure);
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
