use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Converts AppError into a JSON error response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg.clone()),
            AppError::Database(msg) => {
                tracing::error!("Database error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Timeout("x".into()), StatusCode::GATEWAY_TIMEOUT),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
