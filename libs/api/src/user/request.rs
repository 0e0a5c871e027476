use entity::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct UserReq {
    pub username: Option<String>,
}

impl From<UserReq> for UserPayload {
    fn from(value: UserReq) -> Self {
        Self {
            username: value.username,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct PasswordReq {
    pub password: String,
}
