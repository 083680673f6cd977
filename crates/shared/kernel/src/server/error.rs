use super::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shop_database::DatabaseError;
use std::borrow::Cow;
use tracing::{debug, error};

/// Error type of JSON handlers. Feature errors convert into it.
#[shop_derive::shop_error]
pub enum ApiError {
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Bad request{}: {message}", format_context(.context))]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("State error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },

    #[error("Internal server error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::State { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_owned()
        } else {
            debug!(error = %self, %status, "Request rejected");
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(ApiError::not_found("product 9").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("quantity").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn context_is_rendered_in_message() {
        let err: Result<(), ApiError> = Err(ApiError::not_found("product 9"));
        let err = err.context("loading detail").expect_err("still an error");
        assert_eq!(err.to_string(), "Not found (loading detail): product 9");
    }

    #[test]
    fn response_uses_status() {
        let response = ApiError::not_found("product 9").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from("secret detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
