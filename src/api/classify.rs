//! REST API endpoint for image classification

use actix_web::{HttpRequest, HttpResponse, http::header, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::ClassificationOutcome;
use crate::service::ClassificationService;

/// Classify a waste image
///
/// The request body is the raw image; `Content-Type` must be an `image/*` type.
#[utoipa::path(
    post,
    path = "/v1/classify",
    request_body(
        content = Vec<u8>,
        content_type = "image/jpeg",
        description = "Raw image bytes, any image/* content type"
    ),
    responses(
        (status = 200, description = "Image classified", body = ClassificationOutcome),
        (status = 400, description = "Missing, empty, or non-image upload", body = ErrorResponse),
        (status = 503, description = "Primary classifier failed or rejected the image", body = ErrorResponse)
    ),
    tag = "classification"
)]
#[post("/v1/classify")]
pub async fn classify(
    req: HttpRequest,
    body: web::Bytes,
    service: web::Data<ClassificationService>,
) -> Result<HttpResponse, ApiError> {
    let mime_type = image_content_type(&req)?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body is empty".to_string()));
    }

    let filename = upload_filename(&mime_type);
    let outcome = service
        .classify(&body, &filename, Some(&mime_type))
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

fn image_content_type(req: &HttpRequest) -> Result<String, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_lowercase())
        .ok_or_else(|| ApiError::BadRequest("Missing Content-Type header".to_string()))?;

    if !content_type.starts_with("image/") || content_type.len() == "image/".len() {
        return Err(ApiError::BadRequest(format!(
            "Expected an image content type, got {}",
            content_type
        )));
    }

    Ok(content_type)
}

/// Name sent to the model service, which only looks at the extension
fn upload_filename(mime_type: &str) -> String {
    let extension = match mime_type.trim_start_matches("image/") {
        "jpeg" | "pjpeg" => "jpg",
        "svg+xml" => "svg",
        other => other,
    };
    format!("upload.{}", extension)
}

/// Configure classification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(classify);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};

    use crate::service::testing::FixedPrimary;

    fn service(primary: FixedPrimary) -> web::Data<ClassificationService> {
        web::Data::new(ClassificationService::new(Arc::new(primary), None))
    }

    #[actix_web::test]
    async fn test_classify_returns_outcome() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(FixedPrimary::predicting("metal", 80.0)))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/v1/classify")
            .insert_header((header::CONTENT_TYPE, "image/png"))
            .set_payload(&b"\x89PNG image"[..])
            .to_request();
        let json: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["result"]["category"], "metal");
        assert_eq!(json["result"]["source"], "primary_only");
        assert_eq!(json["result"]["confidence"], 80);
        assert_eq!(json["ecoScore"], 8);
        assert_eq!(json["mode"], "verify");
        assert!(json["result"].get("conflictDetails").is_none());
    }

    #[actix_web::test]
    async fn test_non_image_upload_is_rejected() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(FixedPrimary::predicting("metal", 80.0)))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/v1/classify")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("hello")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_primary_outage_is_service_unavailable() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(FixedPrimary::failing(502)))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/v1/classify")
            .insert_header((header::CONTENT_TYPE, "image/jpeg"))
            .set_payload(&b"jpeg bytes"[..])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_primary_rejection_is_service_unavailable() {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(FixedPrimary::failing(415)))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/v1/classify")
            .insert_header((header::CONTENT_TYPE, "image/heic"))
            .set_payload(&b"heic bytes"[..])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upload_filename() {
        assert_eq!(upload_filename("image/jpeg"), "upload.jpg");
        assert_eq!(upload_filename("image/png"), "upload.png");
    }
}
