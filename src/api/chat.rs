//! Argument evaluation endpoint

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{Argument, LimitsConfig, Verdict};
use crate::service::VerdictService;

/// Argument submitted for analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Premises and conclusion in natural language
    #[serde(rename = "userInput")]
    pub user_input: Option<String>,
}

/// Verdict wrapper returned on every evaluated request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: Verdict,
}

/// Evaluate a logical argument
///
/// Reasoning-service failures are reported in the verdict with status
/// `system-error`, still with HTTP 200.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Argument evaluated", body = ChatResponse),
        (status = 400, description = "No input provided"),
        (status = 413, description = "Argument exceeds the configured size limit", body = ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/chat")]
pub async fn chat(
    service: web::Data<VerdictService>,
    limits: web::Data<LimitsConfig>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let argument = Argument::parse(body.into_inner().user_input, limits.max_input_chars)?;

    let verdict = service.evaluate(&argument).await;

    Ok(HttpResponse::Ok().json(ChatResponse { response: verdict }))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat);
}
