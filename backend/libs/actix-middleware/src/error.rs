//! JSON error bodies for middleware rejections
//!
//! Services render their own errors as `{"error", "message", "status"}`; the
//! middleware layer uses the same shape so clients see one error format.

use actix_web::{error::InternalError, http::StatusCode, HttpResponse};
use serde_json::json;

/// Build an `actix_web::Error` whose response is a JSON error body.
pub fn json_error(status: StatusCode, code: &'static str, message: &str) -> actix_web::Error {
    let body = json!({
        "error": code,
        "message": message,
        "status": status.as_u16(),
    });

    InternalError::from_response(message.to_string(), HttpResponse::build(status).json(body))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_carries_status() {
        let err = json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Missing token");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
