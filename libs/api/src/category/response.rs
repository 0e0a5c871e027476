use content::CategoryView;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct CategoryResp {
    pub id: Uuid,
    pub name: String,
    /// Posts in this category visible to the caller.
    pub blog_count: u64,
}

impl From<CategoryView> for CategoryResp {
    fn from(value: CategoryView) -> Self {
        Self {
            id: value.id,
            name: value.name,
            blog_count: value.post_count,
        }
    }
}
