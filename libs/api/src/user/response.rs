use content::UserView;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct UserResp {
    pub id: Uuid,
    pub username: String,
}

impl From<UserView> for UserResp {
    fn from(value: UserView) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}
