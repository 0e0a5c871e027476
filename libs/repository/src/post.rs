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
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<post::Model> for PostEntity {
    fn from(value: post::Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            is_publish: value.is_publish,
            category_id: value.category_id,
            tags: value.tags,
            user_id: value.user_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<PostEntity> for post::ActiveModel {
    fn from(value: PostEntity) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            title: ActiveValue::Set(value.title),
            content: ActiveValue::Set(value.content),
            is_publish: ActiveValue::Set(value.is_publish),
            category_id: ActiveValue::Set(value.category_id),
            tags: ActiveValue::Set(value.tags),
            user_id: ActiveValue::Set(value.user_id),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

fn column(field: Field) -> Option<post::Column> {
    match field {
        Field::Id => Some(post::Column::Id),
        Field::Title => Some(post::Column::Title),
        Field::IsPublish => Some(post::Column::IsPublish),
        Field::CategoryId => Some(post::Column::CategoryId),
        Field::UserId => Some(post::Column::UserId),
        _ => None,
    }
}

#[async_trait]
impl Gateway<PostEntity> for PostRepository {
    async fn find(&self, predicate: &Predicate) -> Response<Vec<PostEntity>> {
        let condition = predicate.into_condition("posts", &column)?;
        let posts = Post::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .into_response("in post find")?;

        Ok(posts.into_iter().map(PostEntity::from).collect())
    }

    async fn count(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("posts", &column)?;
        Post::find()
            .filter(condition)
            .count(&self.db)
            .await
            .into_response("in post count")
    }

    async fn insert(&self, mut record: PostEntity) -> Response<Uuid> {
        let id = Uuid::new_v4();
        record.id = id;

        Post::insert(post::ActiveModel::from(record))
            .exec(&self.db)
            .await
            .into_response("in post insert")?;

        Ok(id)
    }

    async fn update(&self, id: Uuid, mut record: PostEntity) -> Response<()> {
        record.id = id;

        match post::ActiveModel::from(record).update(&self.db).await {
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound {
                collection: "posts",
                id,
            }),
            result => result.map(|_| ()).into_response("in post update"),
        }
    }

    async fn remove(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("posts", &column)?;
        let result = Post::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .into_response("in post remove")?;

        Ok(result.rows_affected)
    }
}
