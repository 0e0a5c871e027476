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
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<category::Model> for CategoryEntity {
    fn from(value: category::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CategoryEntity> for category::ActiveModel {
    fn from(value: CategoryEntity) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name),
        }
    }
}

fn column(field: Field) -> Option<category::Column> {
    match field {
        Field::Id => Some(category::Column::Id),
        Field::Name => Some(category::Column::Name),
        _ => None,
    }
}

#[async_trait]
impl Gateway<CategoryEntity> for CategoryRepository {
    async fn find(
        &self,
        predicate: &Predicate,
    ) -> Response<Vec<CategoryEntity>> {
        let condition = predicate.into_condition("categories", &column)?;
        let categories = Category::find()
            .filter(condition)
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .into_response("in category find")?;

        Ok(categories.into_iter().map(CategoryEntity::from).collect())
    }

    async fn count(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("categories", &column)?;
        Category::find()
            .filter(condition)
            .count(&self.db)
            .await
            .into_response("in category count")
    }

    async fn insert(&self, mut record: CategoryEntity) -> Response<Uuid> {
        let id = Uuid::new_v4();
        record.id = id;

        Category::insert(category::ActiveModel::from(record))
            .exec(&self.db)
            .await
            .into_response("in category insert")?;

        Ok(id)
    }

    async fn update(&self, id: Uuid, mut record: CategoryEntity) -> Response<()> {
        record.id = id;

        match category::ActiveModel::from(record).update(&self.db).await {
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound {
                collection: "categories",
                id,
            }),
            result => result.map(|_| ()).into_response("in category update"),
        }
    }

    async fn remove(&self, predicate: &Predicate) -> Response<u64> {
        let condition = predicate.into_condition("categories", &column)?;
        let result = Category::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .into_response("in category remove")?;

        Ok(result.rows_affected)
    }
}
