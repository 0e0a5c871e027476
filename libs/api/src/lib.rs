use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use content::Content;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use crate::config::Config;

mod auth;
pub mod bootstrap;
pub mod category;
pub mod config;
pub mod healthz;
pub mod login;
pub mod not_found;
pub mod password;
pub mod post;
mod request;
mod response;
pub mod telemetry;
pub mod user;

pub use crate::auth::{Claims, Keys};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    AuthError(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    ClientError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    content: Content,
    keys: Keys,
    config: Arc<Config>,
}

/// Creates the default user when the store has none and builds the router.
pub async fn serve(
    content: Content,
    config: Config,
    jwt_secret: &str,
) -> anyhow::Result<Router> {
    #[derive(OpenApi)]
    #[openapi(
        paths(
            healthz::get_health,
            login::post_login,
            category::get_categories,
            category::get_category,
            category::post_category,
            category::update_category,
            category::delete_category,
            category::get_category_posts,
            category::post_category_post,
            post::get_posts,
            post::get_post,
            post::post_post,
            post::update_post,
            post::delete_post,
            user::update_user,
            user::update_password,
        ),
        components(schemas(
            category::request::CategoryReq,
            category::response::CategoryResp,
            login::request::LoginReq,
            login::response::LoginResp,
            post::request::PostReq,
            post::response::PostResp,
            response::ErrorResp,
            user::request::PasswordReq,
            user::request::UserReq,
            user::response::UserResp,
        )),
        tags(
            (name = "blog", description = "Blog posts and categories API")
        )
    )]
    struct ApiDoc;

    info!(task = "start api serving", port = config.server.port);

    bootstrap::ensure_admin(&content).await?;

    let state = ApiState {
        content,
        keys: Keys::new(jwt_secret.as_bytes()),
        config: Arc::new(config),
    };

    // everything below /admin except login needs a token
    let admin_router = Router::new()
        .route(
            "/categories",
            get(category::get_categories).post(category::post_category),
        )
        .route(
            "/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .patch(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/categories/:id/posts",
            get(category::get_category_posts)
                .post(category::post_category_post),
        )
        .route("/posts", get(post::get_posts).post(post::post_post))
        .route(
            "/posts/:id",
            get(post::get_post)
                .put(post::update_post)
                .patch(post::update_post)
                .delete(post::delete_post),
        )
        .route(
            "/users/:id",
            put(user::update_user).patch(user::update_user),
        )
        .route("/users/:id/password", put(user::update_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth))
        .route("/login", post(login::post_login));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .route("/healthz", get(healthz::get_health))
        .route("/categories", get(category::get_categories))
        .route("/categories/:id", get(category::get_category))
        .route("/categories/:id/posts", get(category::get_category_posts))
        .route("/posts", get(post::get_posts))
        .route("/posts/:id", get(post::get_post))
        .nest("/admin", admin_router)
        .fallback(not_found::get_404)
        .layer(cors)
        .with_state(state);

    Ok(router)
}
