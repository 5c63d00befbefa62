use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::config::AllocationConfig;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub currency: String,
    pub tolerance: String,
}

/// GET /health - Liveness probe
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Ready once the allocation settings are usable
pub async fn readiness_check(config: web::Data<AllocationConfig>) -> impl Responder {
    let ready = match config.validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            false
        }
    };

    let response = ReadinessResponse {
        ready,
        currency: config.currency.to_string(),
        tolerance: config.tolerance.to_string(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
