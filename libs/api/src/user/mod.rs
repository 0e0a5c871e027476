use axum::{extract::State, http::StatusCode, Extension};
use uuid::Uuid;

pub mod request;
pub mod response;

use crate::auth::Claims;
use crate::password;
use crate::request::{Json, Mode, Path};
use crate::response::{ApiResponse, ErrorResp, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::{
    request::{PasswordReq, UserReq},
    response::UserResp,
};

/// Replace (PUT) or merge (PATCH) a user
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    request_body = UserReq,
    responses(
        (status = 201, description = "Update a user successfully", body = UserResp),
        (status = 404, description = "No such user", body = ErrorResp),
        (status = 409, description = "Username already taken", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "user id"),
    )
)]
pub async fn update_user(
    State(state): State<ApiState>,
    Mode(mode): Mode,
    Path(id): Path<Uuid>,
    Json(body): Json<UserReq>,
) -> ApiResponse<(StatusCode, Json<UserResp>)> {
    let user = state.content.users.update(id, body.into(), mode).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Change the caller's own password
#[utoipa::path(
    put,
    path = "/admin/users/{id}/password",
    request_body = PasswordReq,
    responses(
        (status = 204, description = "Password changed"),
        (status = 403, description = "Not the caller's account", body = ErrorResp),
        (status = 404, description = "No such user", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "user id"),
    )
)]
pub async fn update_password(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PasswordReq>,
) -> ApiResponse<StatusCode> {
    if claims.sub != id {
        return Err(ApiError::Forbidden(
            "Can't change other user's password".to_string(),
        ));
    }

    let password_hash =
        password::hash(&body.password).into_response("hash password")?;
    state.content.users.set_password(id, password_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}
