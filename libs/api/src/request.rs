use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::{request::Parts, Method},
    response::{IntoResponse, Response},
};
use entity::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::ApiError;

/// `axum::Json` whose rejection is an [`ApiError`], so a malformed body
/// gets the usual error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Path` rejecting with an [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(task = "parse body", error = rejection.body_text());
        ApiError::ClientError(format!("Bad request: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(task = "parse path", error = rejection.body_text());
        ApiError::ClientError("Invalid id".to_string())
    }
}

/// Update mode chosen by the request method: PUT replaces, PATCH merges.
pub struct Mode(pub UpdateMode);

#[async_trait]
impl<S> FromRequestParts<S> for Mode
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        match parts.method {
            Method::PUT => Ok(Mode(UpdateMode::Replace)),
            Method::PATCH => Ok(Mode(UpdateMode::Merge)),
            _ => Err(ApiError::ClientError(format!(
                "{} can't update a resource",
                parts.method
            ))),
        }
    }
}
