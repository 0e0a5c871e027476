use axum::extract::State;
use content::ContentError;

pub mod request;
pub mod response;

use crate::password;
use crate::request::Json;
use crate::response::{ApiResponse, ErrorResp, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::{request::LoginReq, response::LoginResp};

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Logged in", body = LoginResp),
        (status = 400, description = "Wrong password", body = ErrorResp),
        (status = 404, description = "No such user", body = ErrorResp)
    )
)]
pub async fn post_login(
    State(state): State<ApiState>,
    Json(body): Json<LoginReq>,
) -> ApiResponse<Json<LoginResp>> {
    let user = match state.content.users.find_by_username(&body.username).await
    {
        Ok(user) => user,
        Err(ContentError::NotFound { .. }) => {
            return Err(ApiError::NotFound(format!(
                "No user named {}",
                body.username
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if !password::verify(&body.password, &user.password_hash) {
        return Err(ApiError::ClientError("Wrong password".to_string()));
    }

    let expires_in = state.config.auth.token_exp_secs;
    let access_token = state
        .keys
        .issue(user.id, expires_in)
        .into_response("issue token")?;

    Ok(Json(LoginResp {
        access_token,
        token_type: "bearer".to_string(),
        expires_in,
    }))
}
