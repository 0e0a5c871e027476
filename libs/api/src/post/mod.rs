use axum::{extract::State, http::StatusCode, Extension};
use uuid::Uuid;

pub mod request;
pub mod response;

use crate::auth::{viewer, Claims};
use crate::request::{Json, Mode, Path};
use crate::response::{ApiResponse, ErrorResp};
use crate::ApiState;

use self::{request::PostReq, response::PostResp};

/// List posts
///
/// Anonymous callers get published posts. Authenticated callers also get
/// their own drafts.
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "List posts successfully", body = [PostResp])
    )
)]
pub async fn get_posts(
    claims: Option<Extension<Claims>>,
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<PostResp>>> {
    let posts = state.content.posts.list(&viewer(claims)).await?;

    Ok(Json(posts.into_iter().map(PostResp::from).collect()))
}

/// Get a post
#[utoipa::path(
    get,
    path = "/posts/{id}",
    responses(
        (status = 200, description = "Get a post successfully", body = PostResp),
        (status = 404, description = "No such post", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "post id"),
    )
)]
pub async fn get_post(
    claims: Option<Extension<Claims>>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResponse<Json<PostResp>> {
    let post = state.content.posts.get(id, &viewer(claims)).await?;

    Ok(Json(post.into()))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/admin/posts",
    request_body = PostReq,
    responses(
        (status = 201, description = "Create a post successfully", body = PostResp),
        (status = 400, description = "Missing title or publish flag", body = ErrorResp),
        (status = 409, description = "Title already taken", body = ErrorResp)
    )
)]
pub async fn post_post(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Json(body): Json<PostReq>,
) -> ApiResponse<(StatusCode, Json<PostResp>)> {
    let post = state.content.posts.create(claims.sub, body.into()).await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Replace (PUT) or merge (PATCH) one of the caller's posts
#[utoipa::path(
    put,
    path = "/admin/posts/{id}",
    request_body = PostReq,
    responses(
        (status = 201, description = "Update a post successfully", body = PostResp),
        (status = 404, description = "No such post", body = ErrorResp),
        (status = 409, description = "Title already taken", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "post id"),
    )
)]
pub async fn update_post(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Mode(mode): Mode,
    Path(id): Path<Uuid>,
    Json(body): Json<PostReq>,
) -> ApiResponse<(StatusCode, Json<PostResp>)> {
    let post = state
        .content
        .posts
        .update(claims.sub, id, body.into(), mode)
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Delete one of the caller's posts
#[utoipa::path(
    delete,
    path = "/admin/posts/{id}",
    responses(
        (status = 204, description = "Delete a post successfully")
    ),
    params(
        ("id" = Uuid, Path, description = "post id"),
    )
)]
pub async fn delete_post(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResponse<StatusCode> {
    state.content.posts.delete(claims.sub, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
