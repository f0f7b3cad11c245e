//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::chat::{ChatRequest, ChatResponse};
use crate::api::error::ErrorResponse;
use crate::api::health::HealthStatus;
use crate::model::{ProofStep, Verdict, VerdictStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Logic Verdict Agent",
        description = "Evaluates natural-language logical arguments through an external reasoning model"
    ),
    paths(crate::api::chat::chat, crate::api::health::liveness),
    components(schemas(
        ChatRequest,
        ChatResponse,
        Verdict,
        ProofStep,
        VerdictStatus,
        ErrorResponse,
        HealthStatus
    )),
    tags(
        (name = "chat", description = "Argument evaluation"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
