use chrono::{DateTime, Utc};
use content::PostView;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::category::response::CategoryResp;
use crate::user::response::UserResp;

#[derive(Serialize, ToSchema)]
pub struct PostResp {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_publish: bool,
    pub category: Option<CategoryResp>,
    pub tags: Vec<String>,
    pub user: Option<UserResp>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostResp {
    fn from(value: PostView) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            is_publish: value.is_publish,
            category: value.category.map(CategoryResp::from),
            tags: value.tags,
            user: value.user.map(UserResp::from),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
