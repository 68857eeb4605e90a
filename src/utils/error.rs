use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email and password are required.")]
    MissingCredentials { email: bool, password: bool },

    #[error("User already exists with this email.")]
    UserExists,

    /// Unique index violation raised by the database itself (insert race).
    #[error("A user with this email already exists")]
    DuplicateKey,

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    /// An optimistic write kept losing to concurrent writers.
    #[error("{0}")]
    Conflict(String),

    /// A third-party directory call failed or returned garbage.
    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn code(&self) -> Option<&'static str> {
        match self {
            AppError::UserExists => Some("USER_EXISTS"),
            AppError::DuplicateKey => Some("DUPLICATE_KEY"),
            AppError::InvalidCredentials => Some("INVALID_CREDENTIALS"),
            AppError::Upstream(_) => Some("UPSTREAM_ERROR"),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials { .. }
            | AppError::UserExists
            | AppError::DuplicateKey
            | AppError::Validation(_)
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "success": false,
            "message": self.to_string(),
        });

        if let Some(code) = self.code() {
            body["code"] = json!(code);
        }

        match self {
            AppError::MissingCredentials { email, password } => {
                body["details"] = json!({ "email": email, "password": password });
            }
            AppError::Validation(errors) => {
                body["errors"] = json!(errors);
            }
            AppError::Database(msg) | AppError::Internal(msg) => {
                body["message"] = json!("Internal server error");
                body["error"] = json!(msg);
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::UserExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Upstream("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_missing_credentials_body() {
        let body = body_of(AppError::MissingCredentials { email: true, password: false }).await;
        assert_eq!(body["message"], "Email and password are required.");
        assert_eq!(body["details"]["email"], true);
        assert_eq!(body["details"]["password"], false);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_duplicate_key_carries_code() {
        let body = body_of(AppError::DuplicateKey).await;
        assert_eq!(body["code"], "DUPLICATE_KEY");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_message_behind_generic_text() {
        let body = body_of(AppError::Database("connection reset".into())).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "connection reset");
    }
}
