//! Read models handed to the transport layer.

use chrono::{DateTime, Utc};
use entity::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    /// Posts in this category visible to the viewer who asked.
    pub post_count: u64,
}

impl CategoryView {
    pub fn new(category: CategoryEntity, post_count: u64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            post_count,
        }
    }
}

/// Public profile of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
}

impl From<&UserEntity> for UserView {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_publish: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` when the post has no category or refers to a deleted one.
    pub category: Option<CategoryView>,
    /// `None` when the owning user no longer exists.
    pub user: Option<UserView>,
}

impl PostView {
    pub fn new(
        post: PostEntity,
        category: Option<CategoryView>,
        user: Option<UserView>,
    ) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            is_publish: post.is_publish,
            tags: post.tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
            category,
            user,
        }
    }
}
