use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::active_models::{prelude::*, *};
use crate::filter::{Field, Predicate};
use crate::gateway::Gateway;
use crate::response::IntoResponse;
use crate::{RepositoryError, Response};
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<user::Model> for UserEntity {
    fn from(value: user::Model) -> Self {
        UserEntity {
            id: value.id,
            username: value.username,
            password_hash: value.password_hash,
        }
    }
}

impl From<UserEntity> for user::ActiveModel {
    fn from(value: UserEntity) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            username: ActiveValue::Set(value.username),
            password_hash: ActiveValue::Set(value.password_hash),
        }
    }
}

fn column(field: Field) -> Option<user::Column> {
    match field {
        Field::Id => Some(user::Column::Id),
        Field::Username => Some(user::Column::Username),
        _ => None,
    }
}

#[async_trait]
impl Gateway<UserEntity> for UserRepository {
    async fn find(&self, predicate: &Predicate) -> Response<Vec<UserEntity>> {
        let condition = predicate.into_condition("users", &column)?;
        let users = User::find()
            .filter(condition)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .into_response("in user find")?;

        Ok(users.into_iter().map(UserEntity::from).collect())
    }

    async fn count(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("users", &column)?;
        User::find()
            .filter(condition)
            .count(&self.db)
            .await
            .into_response("in user count")
    }

    async fn insert(&self, mut record: UserEntity) -> Response<Uuid> {
        let id = Uuid::new_v4();
        record.id = id;

        User::insert(user::ActiveModel::from(record))
            .exec(&self.db)
            .await
            .into_response("in user insert")?;

        Ok(id)
    }

    async fn update(&self, id: Uuid, mut record: UserEntity) -> Response<()> {
        record.id = id;

        match user::ActiveModel::from(record).update(&self.db).await {
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound {
                collection: "users",
                id,
            }),
            result => result.map(|_| ()).into_response("in user update"),
        }
    }

    async fn remove(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("users", &column)?;
        let result = User::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .into_response("in user remove")?;

        Ok(result.rows_affected)
    }
}
