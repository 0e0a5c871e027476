use api::{password, serve, Config};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use content::Content;
use entity::prelude::Viewer;
use repository::Repository;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

struct TestApp {
    router: Router,
    content: Content,
}

impl TestApp {
    async fn new() -> Self {
        let content = Content::new(&Repository::in_memory());
        content
            .users
            .create("writer", password::hash("pw").unwrap())
            .await
            .unwrap();
        let router = serve(content.clone(), Config::default(), SECRET)
            .await
            .unwrap();

        Self { router, content }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request =
                request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/admin/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    async fn token(&self) -> String {
        let (_, body) = self.login("writer", "pw").await;
        body["access_token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_healthz_and_unknown_route() {
    let app = TestApp::new().await;

    let (health, _) = app.send(Method::GET, "/healthz", None, None).await;
    let (missing, body) = app.send(Method::GET, "/nowhere", None, None).await;

    assert_eq!(health, StatusCode::OK);
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;

    let (ok, token) = app.login("writer", "pw").await;
    let (wrong, wrong_body) = app.login("writer", "nope").await;
    let (unknown, unknown_body) = app.login("ghost", "pw").await;

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    assert_eq!(token["expires_in"], 86400);
    assert_eq!(wrong, StatusCode::BAD_REQUEST);
    assert_eq!(
        wrong_body,
        json!({ "status": 400, "message": "Wrong password" })
    );
    assert_eq!(unknown, StatusCode::NOT_FOUND);
    assert_eq!(unknown_body["message"], "No user named ghost");
}

#[tokio::test]
async fn test_admin_routes_need_a_valid_token() {
    let app = TestApp::new().await;

    let (missing, missing_body) =
        app.send(Method::GET, "/admin/posts", None, None).await;
    let (invalid, invalid_body) = app
        .send(Method::GET, "/admin/posts", Some("garbage"), None)
        .await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_body["message"], "JWT token required");
    assert_eq!(invalid, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_body["message"], "Invalid JWT token");
}

#[tokio::test]
async fn test_draft_is_visible_to_owner_only() {
    // Arrange
    let app = TestApp::new().await;
    let token = app.token().await;
    let (created, post) = app
        .send(
            Method::POST,
            "/admin/posts",
            Some(&token),
            Some(json!({
                "title": "Draft",
                "content": "x",
                "is_publish": false,
                "category_name": " Tech ",
                "tags": ["rust"]
            })),
        )
        .await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    // Act
    let (public, _) = app.send(Method::GET, &uri, None, None).await;
    let (admin, found) = app
        .send(Method::GET, &format!("/admin{uri}"), Some(&token), None)
        .await;
    let (_, public_categories) =
        app.send(Method::GET, "/categories", None, None).await;
    let (_, admin_categories) = app
        .send(Method::GET, "/admin/categories", Some(&token), None)
        .await;

    // Assert
    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(post["category"]["name"], "Tech");
    assert_eq!(post["user"]["username"], "writer");
    assert_eq!(public, StatusCode::NOT_FOUND);
    assert_eq!(admin, StatusCode::OK);
    assert_eq!(found["title"], "Draft");
    assert_eq!(public_categories[0]["blog_count"], 0);
    assert_eq!(admin_categories[0]["blog_count"], 1);
}

#[tokio::test]
async fn test_put_replaces_and_patch_merges() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (_, post) = app
        .send(
            Method::POST,
            "/admin/posts",
            Some(&token),
            Some(json!({ "title": "A", "content": "x", "is_publish": true })),
        )
        .await;
    let uri = format!("/admin/posts/{}", post["id"].as_str().unwrap());

    let (patched, merged) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({ "content": "y" })))
        .await;
    let (put_without_flag, _) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "title": "B" })))
        .await;
    let (put, replaced) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "title": "B", "is_publish": false })),
        )
        .await;
    let (blank, _) = app
        .send(Method::PATCH, &uri, Some(&token), Some(json!({ "title": "  " })))
        .await;

    assert_eq!(patched, StatusCode::CREATED);
    assert_eq!(merged["title"], "A");
    assert_eq!(merged["content"], "y");
    assert_eq!(put_without_flag, StatusCode::BAD_REQUEST);
    assert_eq!(put, StatusCode::CREATED);
    assert_eq!(replaced["title"], "B");
    assert_eq!(replaced["content"], "");
    assert_eq!(replaced["created_at"], post["created_at"]);
    assert_eq!(blank, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_category_is_a_conflict() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let body = json!({ "name": "News" });

    let (first, category) = app
        .send(Method::POST, "/admin/categories", Some(&token), Some(body.clone()))
        .await;
    let (second, conflict) = app
        .send(Method::POST, "/admin/categories", Some(&token), Some(body))
        .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(category["blog_count"], 0);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(conflict["status"], 409);
}

#[tokio::test]
async fn test_password_change_is_limited_to_self() {
    // Arrange
    let app = TestApp::new().await;
    let token = app.token().await;
    let writer = app.content.users.find_by_username("writer").await.unwrap();
    let other = app.content.users.create("other", Vec::new()).await.unwrap();
    let body = json!({ "password": "new" });

    // Act
    let (forbidden, _) = app
        .send(
            Method::PUT,
            &format!("/admin/users/{}/password", other.id),
            Some(&token),
            Some(body.clone()),
        )
        .await;
    let (changed, _) = app
        .send(
            Method::PUT,
            &format!("/admin/users/{}/password", writer.id),
            Some(&token),
            Some(body),
        )
        .await;

    // Assert
    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(changed, StatusCode::NO_CONTENT);
    assert_eq!(app.login("writer", "pw").await.0, StatusCode::BAD_REQUEST);
    assert_eq!(app.login("writer", "new").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_id_gets_error_body() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (public, public_body) =
        app.send(Method::GET, "/posts/not-a-uuid", None, None).await;
    let (admin, admin_body) = app
        .send(
            Method::PATCH,
            "/admin/categories/not-a-uuid",
            Some(&token),
            Some(json!({ "name": "News" })),
        )
        .await;

    assert_eq!(public, StatusCode::BAD_REQUEST);
    assert_eq!(public_body, json!({ "status": 400, "message": "Invalid id" }));
    assert_eq!(admin, StatusCode::BAD_REQUEST);
    assert_eq!(admin_body["status"], 400);
}

#[tokio::test]
async fn test_malformed_body_gets_error_body() {
    // Arrange
    let app = TestApp::new().await;
    let token = app.token().await;

    // Act
    let (wrong_type, wrong_type_body) = app
        .send(
            Method::POST,
            "/admin/posts",
            Some(&token),
            Some(json!({ "title": 5, "is_publish": true })),
        )
        .await;
    let (login, login_body) = app
        .send(
            Method::POST,
            "/admin/login",
            None,
            Some(json!({ "username": "writer" })),
        )
        .await;

    // Assert
    assert_eq!(wrong_type, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_type_body["status"], 400);
    assert!(wrong_type_body["message"]
        .as_str()
        .unwrap()
        .starts_with("Bad request"));
    assert_eq!(login, StatusCode::BAD_REQUEST);
    assert_eq!(login_body["status"], 400);
    let posts = app.content.posts.list(&Viewer::Anonymous).await.unwrap();
    assert!(posts.is_empty());
}
