use axum::{http::StatusCode, response::IntoResponse, Json};
use content::ContentError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::ApiError;

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResp {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthError(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ClientError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let body = ErrorResp {
            status: status_code.as_u16(),
            message: self.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound { kind } => {
                ApiError::NotFound(format!("No such {kind}"))
            }
            ContentError::DuplicateName { kind, name } => {
                ApiError::Conflict(format!("{kind} {name:?} already exists"))
            }
            ContentError::InvalidContent(message) => {
                ApiError::ClientError(message)
            }
            ContentError::StoreUnavailable(e) => {
                error!(task = "content", error = e.to_string());
                ApiError::ServerError("Internal server error".to_string())
            }
        }
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, task: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, task: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(task, error = format!("{e:?}"));
            ApiError::ServerError("Internal server error".to_string())
        })
    }
}

#[cfg(test)]
mod test {
    use repository::RepositoryError;

    use super::*;

    #[test]
    fn test_content_errors_map_to_status() {
        let cases = [
            (
                ContentError::NotFound { kind: "post" },
                StatusCode::NOT_FOUND,
            ),
            (
                ContentError::DuplicateName {
                    kind: "category",
                    name: "Tech".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                ContentError::InvalidContent("title".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ContentError::StoreUnavailable(RepositoryError::Unavailable(
                    "down".to_string(),
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }

    #[test]
    fn test_store_details_are_not_leaked() {
        let error = ApiError::from(ContentError::StoreUnavailable(
            RepositoryError::Unavailable("password=hunter2".to_string()),
        ));

        assert!(!error.to_string().contains("hunter2"));
    }
}
