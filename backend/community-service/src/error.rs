/// Error types for Community Service
///
/// Every error is rendered as `{"error": <code>, "message": <text>, "status": <u16>}`.
/// Database and internal failures are logged and surfaced with a generic message.
use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for community-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code used in the response body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) | AppError::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.code(),
            "message": self.public_message(),
            "status": status.as_u16(),
        }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: invalid value ({})", field, err.code),
                })
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join("; "))
    }
}

/// Maps JSON body extraction failures to the common error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

/// Maps query string extraction failures to the common error body
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query parameters: {}", err)).into()
}

/// Maps path extraction failures (e.g. a malformed UUID) to the common error body
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_rt::test]
    async fn test_error_body_shape() {
        let resp = AppError::NotFound("Post not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Post not found");
        assert_eq!(json["status"], 404);
    }

    #[actix_rt::test]
    async fn test_database_error_is_not_leaked() {
        let resp = AppError::Database(sqlx::Error::PoolTimedOut).error_response();

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "Internal server error");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3, message = "name is too long"))]
        name: String,
    }

    #[test]
    fn test_validation_errors_use_messages() {
        let errors = Sample {
            name: "abcd".into(),
        }
        .validate()
        .unwrap_err();

        match AppError::from(errors) {
            AppError::Validation(msg) => assert_eq!(msg, "name is too long"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
