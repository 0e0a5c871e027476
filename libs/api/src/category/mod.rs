use axum::{extract::State, http::StatusCode, Extension};
use uuid::Uuid;

pub mod request;
pub mod response;

use crate::auth::{viewer, Claims};
use crate::post::request::PostReq;
use crate::post::response::PostResp;
use crate::request::{Json, Mode, Path};
use crate::response::{ApiResponse, ErrorResp};
use crate::ApiState;

use self::{request::CategoryReq, response::CategoryResp};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List all categories successfully", body = [CategoryResp])
    )
)]
pub async fn get_categories(
    claims: Option<Extension<Claims>>,
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<CategoryResp>>> {
    let categories = state.content.categories.list(&viewer(claims)).await?;

    Ok(Json(categories.into_iter().map(CategoryResp::from).collect()))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/categories/{id}",
    responses(
        (status = 200, description = "Get a category successfully", body = CategoryResp),
        (status = 404, description = "No such category", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "category id"),
    )
)]
pub async fn get_category(
    claims: Option<Extension<Claims>>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResponse<Json<CategoryResp>> {
    let category = state.content.categories.get(id, &viewer(claims)).await?;

    Ok(Json(category.into()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CategoryReq,
    responses(
        (status = 201, description = "Create a category successfully", body = CategoryResp),
        (status = 409, description = "Name already taken", body = ErrorResp)
    )
)]
pub async fn post_category(
    State(state): State<ApiState>,
    Json(body): Json<CategoryReq>,
) -> ApiResponse<(StatusCode, Json<CategoryResp>)> {
    let category = state.content.categories.create(body.into()).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Replace (PUT) or merge (PATCH) a category
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    request_body = CategoryReq,
    responses(
        (status = 201, description = "Update a category successfully", body = CategoryResp),
        (status = 404, description = "No such category", body = ErrorResp),
        (status = 409, description = "Name already taken", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "category id"),
    )
)]
pub async fn update_category(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Mode(mode): Mode,
    Path(id): Path<Uuid>,
    Json(body): Json<CategoryReq>,
) -> ApiResponse<(StatusCode, Json<CategoryResp>)> {
    let category = state
        .content
        .categories
        .update(id, body.into(), mode, &claims.viewer())
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    responses(
        (status = 204, description = "Delete a category successfully")
    ),
    params(
        ("id" = Uuid, Path, description = "category id"),
    )
)]
pub async fn delete_category(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResponse<StatusCode> {
    state.content.categories.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the posts of a category
#[utoipa::path(
    get,
    path = "/categories/{id}/posts",
    responses(
        (status = 200, description = "List posts of a category successfully", body = [PostResp]),
        (status = 404, description = "No such category", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "category id"),
    )
)]
pub async fn get_category_posts(
    claims: Option<Extension<Claims>>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResponse<Json<Vec<PostResp>>> {
    let posts = state
        .content
        .posts
        .list_in_category(id, &viewer(claims))
        .await?;

    Ok(Json(posts.into_iter().map(PostResp::from).collect()))
}

/// Create a post in a category
#[utoipa::path(
    post,
    path = "/admin/categories/{id}/posts",
    request_body = PostReq,
    responses(
        (status = 201, description = "Create a post successfully", body = PostResp),
        (status = 404, description = "No such category", body = ErrorResp)
    ),
    params(
        ("id" = Uuid, Path, description = "category id"),
    )
)]
pub async fn post_category_post(
    Extension(claims): Extension<Claims>,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PostReq>,
) -> ApiResponse<(StatusCode, Json<PostResp>)> {
    let post = state
        .content
        .posts
        .create_in_category(claims.sub, id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}
