use std::sync::Arc;

use entity::prelude::*;
use repository::{Field, Gateway, Predicate, Repository, RepositoryError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: Uuid,
    pub created: bool,
}

/// Turns a free-text category name into a category id, creating the
/// category on first use.
#[derive(Clone, Debug)]
pub struct CategoryResolver {
    categories: Arc<dyn Gateway<CategoryEntity>>,
    posts: Arc<dyn Gateway<PostEntity>>,
}

impl CategoryResolver {
    pub fn new(repo: &Repository) -> Self {
        Self {
            categories: repo.category.clone(),
            posts: repo.post.clone(),
        }
    }

    /// Returns `None` for a name that is empty after trimming.
    ///
    /// Lookup and insert are two calls. When another resolver inserts the
    /// same name in between, the store rejects the second insert and the
    /// winner's id is returned with `created == false`.
    pub async fn resolve(&self, name: &str) -> ContentResult<Option<Resolved>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(Some(Resolved {
                id: existing.id,
                created: false,
            }));
        }

        let category = CategoryEntity {
            name: name.to_string(),
            ..Default::default()
        };
        match self.categories.insert(category).await {
            Ok(id) => {
                info!(task = "create category", name, id = id.to_string());
                Ok(Some(Resolved { id, created: true }))
            }
            Err(RepositoryError::Conflict { .. }) => {
                let existing = self
                    .find_by_name(name)
                    .await?
                    .ok_or(ContentError::NotFound { kind: "category" })?;
                Ok(Some(Resolved {
                    id: existing.id,
                    created: false,
                }))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Undoes a creation made by [`resolve`](Self::resolve) after the write
    /// that needed the category failed. The category is only removed while
    /// no post refers to it. Failures are logged, not returned: the caller
    /// is already reporting the error that made the write fail.
    pub async fn release(&self, resolved: Option<Resolved>) {
        let Some(Resolved { id, created: true }) = resolved else {
            return;
        };

        let in_use = Predicate::eq(Field::CategoryId, id);
        let result = match self.posts.count(&in_use).await {
            Ok(0) => self.categories.remove(&Predicate::id(id)).await,
            Ok(_) => return,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => info!(task = "release category", id = id.to_string()),
            Err(e) => warn!(
                task = "release category",
                id = id.to_string(),
                error = e.to_string()
            ),
        }
    }

    /// Checks that the category a post was just written with still exists.
    /// A concurrent [`release`](Self::release) may have removed it between
    /// `resolve` and the write; the name is then resolved again.
    pub async fn confirm(
        &self,
        resolved: Resolved,
        name: &str,
    ) -> ContentResult<Option<Resolved>> {
        let exists = self.categories.count(&Predicate::id(resolved.id)).await?;
        if exists > 0 {
            return Ok(Some(resolved));
        }

        warn!(
            task = "confirm category",
            id = resolved.id.to_string(),
            name = name.trim(),
            "category vanished, resolving again"
        );
        self.resolve(name).await
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> ContentResult<Option<CategoryEntity>> {
        Ok(self
            .categories
            .find_one(&Predicate::eq(Field::Name, name))
            .await?)
    }
}
