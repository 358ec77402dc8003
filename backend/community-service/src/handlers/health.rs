/// Health endpoints
///
/// `/health` and `/healthz` answer only when exposure is enabled or the probe
/// presents the shared health key; otherwise they look like any unknown route.
use crate::config::HealthConfig;
use crate::error::{AppError, Result};
use actix_web::{web, HttpRequest, HttpResponse};

pub const HEALTH_KEY_HEADER: &str = "x-aircanvas-health-key";

/// Whether this request may see the health endpoints
pub fn health_allowed(config: &HealthConfig, req: &HttpRequest) -> bool {
    if config.expose_endpoints {
        return true;
    }

    let Some(expected) = config.secret.as_deref() else {
        return false;
    };

    req.headers()
        .get(HEALTH_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|presented| crypto_core::hash::secrets_match(presented.as_bytes(), expected.as_bytes()))
        .unwrap_or(false)
}

pub async fn health(config: web::Data<HealthConfig>, req: HttpRequest) -> Result<HttpResponse> {
    if !health_allowed(&config, &req) {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}
