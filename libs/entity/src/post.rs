use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_publish: bool,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a post. Both states accept further updates; the publish
/// flag of an update payload is the only thing that moves between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PostState {
    Draft,
    Published,
}

impl Post {
    pub fn state(&self) -> PostState {
        if self.is_publish {
            PostState::Published
        } else {
            PostState::Draft
        }
    }
}
