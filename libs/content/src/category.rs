use std::sync::Arc;

use entity::prelude::*;
use repository::{Field, Gateway, Predicate, Repository};
use tracing::info;
use uuid::Uuid;

use crate::count::PostCounter;
use crate::error::{ContentError, ContentResult, IntoContentResult};
use crate::merger::{require_text, UpdateMerger};
use crate::view::CategoryView;

#[derive(Clone, Debug)]
pub struct CategoryService {
    categories: Arc<dyn Gateway<CategoryEntity>>,
    counter: PostCounter,
}

impl CategoryService {
    pub fn new(repo: &Repository) -> Self {
        Self {
            categories: repo.category.clone(),
            counter: PostCounter::new(repo),
        }
    }

    /// Every category with the number of posts `viewer` can see in it. A
    /// failing count fails the whole listing.
    pub async fn list(&self, viewer: &Viewer) -> ContentResult<Vec<CategoryView>> {
        let categories = self.categories.find(&Predicate::All).await?;

        let mut views = Vec::with_capacity(categories.len());
        for category in categories {
            views.push(self.view(category, viewer).await?);
        }
        Ok(views)
    }

    pub async fn get(
        &self,
        id: Uuid,
        viewer: &Viewer,
    ) -> ContentResult<CategoryView> {
        let category = self.find(id).await?;
        self.view(category, viewer).await
    }

    pub async fn create(
        &self,
        payload: CategoryPayload,
    ) -> ContentResult<CategoryView> {
        let name =
            require_text(payload.name.as_deref().unwrap_or_default(), "category name")?;

        if self.name_taken(&name, None).await? {
            return Err(ContentError::DuplicateName {
                kind: "category",
                name,
            });
        }

        let category = CategoryEntity {
            name: name.clone(),
            ..Default::default()
        };
        let id = self
            .categories
            .insert(category.clone())
            .await
            .or_duplicate("category", &name)?;
        info!(task = "create category", name, id = id.to_string());

        Ok(CategoryView::new(CategoryEntity { id, ..category }, 0))
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: CategoryPayload,
        mode: UpdateMode,
        viewer: &Viewer,
    ) -> ContentResult<CategoryView> {
        let existing = self.find(id).await?;
        let category = UpdateMerger::merge_category(&existing, payload, mode)?;

        if self.name_taken(&category.name, Some(id)).await? {
            return Err(ContentError::DuplicateName {
                kind: "category",
                name: category.name,
            });
        }

        self.categories
            .update(id, category.clone())
            .await
            .or_duplicate("category", &category.name)?;

        self.view(category, viewer).await
    }

    /// Posts keep their reference to a removed category; readers then see
    /// them without a category.
    pub async fn delete(&self, id: Uuid) -> ContentResult<()> {
        let removed = self.categories.remove(&Predicate::id(id)).await?;
        if removed > 0 {
            info!(task = "delete category", id = id.to_string());
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> ContentResult<CategoryEntity> {
        self.categories
            .find_one(&Predicate::id(id))
            .await?
            .ok_or(ContentError::NotFound { kind: "category" })
    }

    async fn name_taken(
        &self,
        name: &str,
        except: Option<Uuid>,
    ) -> ContentResult<bool> {
        let holders = self
            .categories
            .find(&Predicate::eq(Field::Name, name))
            .await?;
        Ok(holders.iter().any(|c| Some(c.id) != except))
    }

    async fn view(
        &self,
        category: CategoryEntity,
        viewer: &Viewer,
    ) -> ContentResult<CategoryView> {
        let post_count = self.counter.count_visible(category.id, viewer).await?;
        Ok(CategoryView::new(category, post_count))
    }
}
