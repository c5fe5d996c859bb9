//! OpenAPI specification endpoints

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::{classify, health};
use crate::model::{
    Awareness, ClassificationMode, ClassificationOutcome, ClassificationResult, ConflictDetails,
    DisposalInstructions, EnvironmentalImpact, ResultSource,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Waste Sorter API",
        description = "Waste image classification with disposal guidance and eco scores"
    ),
    paths(classify::classify, health::liveness, health::readiness),
    components(schemas(
        ClassificationOutcome,
        ClassificationResult,
        ClassificationMode,
        ResultSource,
        ConflictDetails,
        DisposalInstructions,
        EnvironmentalImpact,
        Awareness,
        ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth
    )),
    tags(
        (name = "classification", description = "Waste image classification"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
