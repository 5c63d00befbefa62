use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::core::AppError;
use crate::middleware::request_id::request_id;

/// Reports malformed or mistyped JSON bodies in the same shape as `AppError`
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(
        path = %req.path(),
        request_id = %request_id(req).unwrap_or_default(),
        "Rejected request body: {}",
        err
    );
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

/// JSON extractor settings for the preview endpoints
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(json_error_handler)
}
