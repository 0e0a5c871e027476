use entity::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CategoryReq {
    pub name: Option<String>,
}

impl From<CategoryReq> for CategoryPayload {
    fn from(value: CategoryReq) -> Self {
        Self { name: value.name }
    }
}
