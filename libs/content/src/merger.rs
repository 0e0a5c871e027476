//! Computes the next state of a record from an update payload.
//!
//! Server-owned fields (id, owner, created timestamp) always come from the
//! existing record and `updated_at` is always stamped here. Validation runs
//! before any category is resolved, so a rejected payload writes nothing.

use chrono::Utc;
use entity::prelude::*;
use repository::Repository;

use crate::error::{ContentError, ContentResult};
use crate::resolver::{CategoryResolver, Resolved};

#[derive(Debug, Clone, PartialEq)]
pub struct MergedPost {
    pub post: PostEntity,
    /// Set when the category name changed and was resolved again.
    pub category: Option<Resolved>,
}

#[derive(Clone, Debug)]
pub struct UpdateMerger {
    resolver: CategoryResolver,
}

impl UpdateMerger {
    pub fn new(repo: &Repository) -> Self {
        Self {
            resolver: CategoryResolver::new(repo),
        }
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    /// `existing_category` is the name of the category the post currently
    /// refers to, if that category still exists. A reference to a removed
    /// category is not carried forward.
    pub async fn merge_post(
        &self,
        existing: &PostEntity,
        existing_category: Option<&str>,
        payload: PostPayload,
        mode: UpdateMode,
    ) -> ContentResult<MergedPost> {
        let previous_category = existing_category.unwrap_or_default();

        let (title, content, is_publish, category_name, tags) = match mode {
            UpdateMode::Replace => (
                payload.title.unwrap_or_default(),
                payload.content.unwrap_or_default(),
                payload.is_publish.value().ok_or_else(|| {
                    ContentError::InvalidContent(
                        "is_publish is required".to_string(),
                    )
                })?,
                payload.category_name.unwrap_or_default(),
                payload.tags.unwrap_or_default(),
            ),
            UpdateMode::Merge => (
                payload.title.unwrap_or_else(|| existing.title.clone()),
                payload.content.unwrap_or_else(|| existing.content.clone()),
                payload.is_publish.value().unwrap_or(existing.is_publish),
                payload
                    .category_name
                    .unwrap_or_else(|| previous_category.to_string()),
                payload.tags.unwrap_or_else(|| existing.tags.clone()),
            ),
        };

        let title = require_text(&title, "title")?;

        let category_name = category_name.trim();
        let (category_id, category) = if category_name.is_empty() {
            (None, None)
        } else if category_name == previous_category {
            (existing.category_id, None)
        } else {
            match self.resolver.resolve(category_name).await? {
                Some(resolved) => (Some(resolved.id), Some(resolved)),
                None => (None, None),
            }
        };

        Ok(MergedPost {
            post: PostEntity {
                id: existing.id,
                title,
                content,
                is_publish,
                category_id,
                tags,
                user_id: existing.user_id,
                created_at: existing.created_at,
                updated_at: Utc::now(),
            },
            category,
        })
    }

    pub fn merge_category(
        existing: &CategoryEntity,
        payload: CategoryPayload,
        mode: UpdateMode,
    ) -> ContentResult<CategoryEntity> {
        let name = match mode {
            UpdateMode::Replace => payload.name.unwrap_or_default(),
            UpdateMode::Merge => {
                payload.name.unwrap_or_else(|| existing.name.clone())
            }
        };

        Ok(CategoryEntity {
            id: existing.id,
            name: require_text(&name, "category name")?,
        })
    }

    /// The password hash is never taken from a payload.
    pub fn merge_user(
        existing: &UserEntity,
        payload: UserPayload,
        mode: UpdateMode,
    ) -> ContentResult<UserEntity> {
        let username = match mode {
            UpdateMode::Replace => payload.username.unwrap_or_default(),
            UpdateMode::Merge => {
                payload.username.unwrap_or_else(|| existing.username.clone())
            }
        };

        Ok(UserEntity {
            id: existing.id,
            username: require_text(&username, "username")?,
            password_hash: existing.password_hash.clone(),
        })
    }
}

pub(crate) fn require_text(value: &str, what: &str) -> ContentResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContentError::InvalidContent(format!(
            "{what} shouldn't be just some whitespace"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use repository::{Gateway, Predicate};
    use uuid::Uuid;

    use super::*;

    fn existing_post() -> PostEntity {
        let created_at = Utc::now() - Duration::days(3);
        PostEntity {
            id: Uuid::new_v4(),
            title: "A".to_string(),
            content: "x".to_string(),
            is_publish: false,
            category_id: Some(Uuid::new_v4()),
            tags: vec!["rust".to_string()],
            user_id: Uuid::new_v4(),
            created_at,
            updated_at: created_at,
        }
    }

    fn merger() -> (UpdateMerger, Repository) {
        let repo = Repository::in_memory();
        (UpdateMerger::new(&repo), repo)
    }

    #[tokio::test]
    async fn test_merge_keeps_unsent_fields() {
        // Arrange
        let (merger, _) = merger();
        let existing = existing_post();
        let payload = PostPayload {
            content: Some("y".to_string()),
            ..Default::default()
        };

        // Act
        let merged = merger
            .merge_post(&existing, Some("Tech"), payload, UpdateMode::Merge)
            .await
            .unwrap();

        // Assert
        assert_eq!(merged.post.title, "A");
        assert_eq!(merged.post.content, "y");
        assert!(!merged.post.is_publish);
        assert_eq!(merged.post.tags, existing.tags);
        assert_eq!(merged.post.category_id, existing.category_id);
        assert_eq!(merged.category, None);
    }

    #[tokio::test]
    async fn test_merge_preserves_server_owned_fields() {
        let (merger, _) = merger();
        let existing = existing_post();
        let before = Utc::now();

        for mode in [UpdateMode::Merge, UpdateMode::Replace] {
            let payload = PostPayload {
                title: Some("B".to_string()),
                is_publish: PublishFlag::Published,
                ..Default::default()
            };
            let merged = merger
                .merge_post(&existing, None, payload, mode)
                .await
                .unwrap()
                .post;

            assert_eq!(merged.id, existing.id);
            assert_eq!(merged.user_id, existing.user_id);
            assert_eq!(merged.created_at, existing.created_at);
            assert!(merged.updated_at >= before);
        }
    }

    #[tokio::test]
    async fn test_replace_resets_unsent_fields() {
        // Arrange
        let (merger, repo) = merger();
        let existing = existing_post();
        let payload = PostPayload {
            title: Some("  B  ".to_string()),
            is_publish: PublishFlag::Published,
            ..Default::default()
        };

        // Act
        let merged = merger
            .merge_post(&existing, Some("Tech"), payload, UpdateMode::Replace)
            .await
            .unwrap();

        // Assert
        assert_eq!(merged.post.title, "B");
        assert_eq!(merged.post.content, "");
        assert!(merged.post.is_publish);
        assert!(merged.post.tags.is_empty());
        assert_eq!(merged.post.category_id, None);
        assert_eq!(repo.category.count(&Predicate::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_requires_publish_flag() {
        let (merger, _) = merger();
        let payload = PostPayload {
            title: Some("B".to_string()),
            ..Default::default()
        };

        let result = merger
            .merge_post(&existing_post(), None, payload, UpdateMode::Replace)
            .await;

        assert!(matches!(result, Err(ContentError::InvalidContent(_))));
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected_before_resolving() {
        // Arrange
        let (merger, repo) = merger();
        let payload = PostPayload {
            title: Some("   ".to_string()),
            category_name: Some("New".to_string()),
            ..Default::default()
        };

        // Act
        let result = merger
            .merge_post(&existing_post(), None, payload, UpdateMode::Merge)
            .await;

        // Assert
        assert!(matches!(result, Err(ContentError::InvalidContent(_))));
        assert_eq!(repo.category.count(&Predicate::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_changed_category_name_is_resolved() {
        let (merger, repo) = merger();
        let existing = existing_post();
        let payload = PostPayload {
            category_name: Some(" Travel ".to_string()),
            ..Default::default()
        };

        let merged = merger
            .merge_post(&existing, Some("Tech"), payload, UpdateMode::Merge)
            .await
            .unwrap();

        let resolved = merged.category.unwrap();
        assert!(resolved.created);
        assert_eq!(merged.post.category_id, Some(resolved.id));
        let travel = repo.category.find(&Predicate::id(resolved.id)).await;
        assert_eq!(travel.unwrap()[0].name, "Travel");
    }

    #[tokio::test]
    async fn test_unchanged_category_name_is_carried_forward() {
        let (merger, repo) = merger();
        let existing = existing_post();
        let payload = PostPayload {
            category_name: Some("Tech ".to_string()),
            ..Default::default()
        };

        let merged = merger
            .merge_post(&existing, Some("Tech"), payload, UpdateMode::Merge)
            .await
            .unwrap();

        assert_eq!(merged.post.category_id, existing.category_id);
        assert_eq!(merged.category, None);
        assert_eq!(repo.category.count(&Predicate::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleted_category_is_dropped() {
        let (merger, _) = merger();
        let existing = existing_post();

        for mode in [UpdateMode::Replace, UpdateMode::Merge] {
            let payload = PostPayload {
                title: Some("A".to_string()),
                is_publish: PublishFlag::Draft,
                ..Default::default()
            };
            let merged = merger
                .merge_post(&existing, None, payload, mode)
                .await
                .unwrap();

            assert_eq!(merged.post.category_id, None);
            assert_eq!(merged.category, None);
        }
    }

    #[tokio::test]
    async fn test_publish_toggles_both_ways() {
        let (merger, _) = merger();
        let draft = existing_post();

        let published = merger
            .merge_post(
                &draft,
                None,
                PostPayload {
                    is_publish: PublishFlag::Published,
                    ..Default::default()
                },
                UpdateMode::Merge,
            )
            .await
            .unwrap()
            .post;
        assert_eq!(published.state(), PostState::Published);

        let unpublished = merger
            .merge_post(
                &published,
                None,
                PostPayload {
                    is_publish: PublishFlag::Draft,
                    ..Default::default()
                },
                UpdateMode::Merge,
            )
            .await
            .unwrap()
            .post;
        assert_eq!(unpublished.state(), PostState::Draft);
    }

    #[test]
    fn test_merge_category() {
        let existing = CategoryEntity {
            id: Uuid::new_v4(),
            name: "News".to_string(),
        };

        let kept = UpdateMerger::merge_category(
            &existing,
            CategoryPayload::default(),
            UpdateMode::Merge,
        )
        .unwrap();
        assert_eq!(kept, existing);

        let replaced = UpdateMerger::merge_category(
            &existing,
            CategoryPayload::default(),
            UpdateMode::Replace,
        );
        assert!(matches!(replaced, Err(ContentError::InvalidContent(_))));
    }

    #[test]
    fn test_merge_user_keeps_password_hash() {
        let existing = UserEntity {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: b"hash".to_vec(),
        };

        let merged = UpdateMerger::merge_user(
            &existing,
            UserPayload {
                username: Some(" editor ".to_string()),
            },
            UpdateMode::Replace,
        )
        .unwrap();

        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.username, "editor");
        assert_eq!(merged.password_hash, existing.password_hash);
    }
}
