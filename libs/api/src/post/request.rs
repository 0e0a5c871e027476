use entity::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

/// Fields left out of the body are `None`. On POST and PUT that means empty;
/// on PATCH it means unchanged.
#[derive(Deserialize, ToSchema)]
pub struct PostReq {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Required on POST and PUT.
    pub is_publish: Option<bool>,
    /// Resolved to an existing category or a new one; blank means none.
    pub category_name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<PostReq> for PostPayload {
    fn from(value: PostReq) -> Self {
        Self {
            title: value.title,
            content: value.content,
            is_publish: value.is_publish.into(),
            category_name: value.category_name,
            tags: value.tags,
        }
    }
}
