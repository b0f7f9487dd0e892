use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::ServiceError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    /// Per-field messages of a failed validation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Wrapper so we can implement `IntoResponse` for `ServiceError`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(ServiceError::Internal(err))
    }
}

fn bad_request(message: String) -> ApiError {
    let mut errors = crate::application::error::ValidationErrors::default();
    errors.add("body", &message);
    ApiError(ServiceError::Validation(errors))
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::UserNotFound(_)
            | ServiceError::UserEmailNotFound(_)
            | ServiceError::TaskNotFound(_)
            | ServiceError::TaskTitleNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::EmailAlreadyExists
            | ServiceError::EmailInUse
            | ServiceError::TitleAlreadyExists(_)
            | ServiceError::UserAlreadyAttached(_)
            | ServiceError::UserNotAttached(_) => StatusCode::CONFLICT,
            ServiceError::InvalidCurrentPassword | ServiceError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::InvalidCredentials | ServiceError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            ServiceError::Validation(errors) => ErrorResponse {
                status: status.as_u16(),
                message: "Validation failed".into(),
                errors: Some(errors.0),
            },
            ServiceError::Internal(err) => {
                tracing::error!(error = ?err, "request_failed");
                ErrorResponse {
                    status: status.as_u16(),
                    message: "Internal server error".into(),
                    errors: None,
                }
            }
            other => ErrorResponse {
                status: status.as_u16(),
                message: other.to_string(),
                errors: None,
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_http_statuses() {
        let cases = [
            (ServiceError::TaskNotFound(1), StatusCode::NOT_FOUND),
            (ServiceError::EmailInUse, StatusCode::CONFLICT),
            (ServiceError::UserNotAttached(2), StatusCode::CONFLICT),
            (ServiceError::InvalidCurrentPassword, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (
                ServiceError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn internal_errors_become_500() {
        let response = ApiError(ServiceError::Internal(anyhow::anyhow!("db password wrong")))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
