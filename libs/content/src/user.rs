use std::sync::Arc;

use entity::prelude::*;
use repository::{Field, Gateway, Predicate, Repository};
use tracing::info;
use uuid::Uuid;

use crate::error::{ContentError, ContentResult, IntoContentResult};
use crate::merger::{require_text, UpdateMerger};
use crate::view::UserView;

/// Accounts that own posts. Password hashes are produced and checked by the
/// caller; this service only stores them.
#[derive(Clone, Debug)]
pub struct UserService {
    users: Arc<dyn Gateway<UserEntity>>,
}

impl UserService {
    pub fn new(repo: &Repository) -> Self {
        Self {
            users: repo.user.clone(),
        }
    }

    pub async fn get(&self, id: Uuid) -> ContentResult<UserEntity> {
        self.users
            .find_one(&Predicate::id(id))
            .await?
            .ok_or(ContentError::NotFound { kind: "user" })
    }

    /// Matches the stored username exactly; surrounding whitespace is not
    /// trimmed.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> ContentResult<UserEntity> {
        self.users
            .find_one(&Predicate::eq(Field::Username, username))
            .await?
            .ok_or(ContentError::NotFound { kind: "user" })
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: Vec<u8>,
    ) -> ContentResult<UserEntity> {
        let username = require_text(username, "username")?;
        if self.username_taken(&username, None).await? {
            return Err(ContentError::DuplicateName {
                kind: "user",
                name: username,
            });
        }

        let user = UserEntity {
            username: username.clone(),
            password_hash,
            ..Default::default()
        };
        let id = self
            .users
            .insert(user.clone())
            .await
            .or_duplicate("user", &username)?;
        info!(task = "create user", username, id = id.to_string());

        Ok(UserEntity { id, ..user })
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UserPayload,
        mode: UpdateMode,
    ) -> ContentResult<UserView> {
        let existing = self.get(id).await?;
        let user = UpdateMerger::merge_user(&existing, payload, mode)?;

        if self.username_taken(&user.username, Some(id)).await? {
            return Err(ContentError::DuplicateName {
                kind: "user",
                name: user.username,
            });
        }

        self.users
            .update(id, user.clone())
            .await
            .or_duplicate("user", &user.username)?;
        Ok(UserView::from(&user))
    }

    pub async fn set_password(
        &self,
        id: Uuid,
        password_hash: Vec<u8>,
    ) -> ContentResult<()> {
        let user = UserEntity {
            password_hash,
            ..self.get(id).await?
        };
        let username = user.username.clone();
        self.users
            .update(id, user)
            .await
            .or_duplicate("user", &username)?;
        info!(task = "set password", id = id.to_string());
        Ok(())
    }

    pub async fn is_empty(&self) -> ContentResult<bool> {
        Ok(self.users.count(&Predicate::All).await? == 0)
    }

    async fn username_taken(
        &self,
        username: &str,
        except: Option<Uuid>,
    ) -> ContentResult<bool> {
        let holders = self
            .users
            .find(&Predicate::eq(Field::Username, username))
            .await?;
        Ok(holders.iter().any(|u| Some(u.id) != except))
    }
}
