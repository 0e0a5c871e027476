use std::sync::Arc;

use entity::prelude::*;
use repository::{Gateway, Repository};
use tracing::error;
use uuid::Uuid;

use crate::error::ContentResult;
use crate::visibility::{filter_for, Scope};

/// Number of posts in a category that a viewer can see.
///
/// Counts are recomputed on every call and never stored: publish state and
/// ownership may change between two reads.
#[derive(Clone, Debug)]
pub struct PostCounter {
    posts: Arc<dyn Gateway<PostEntity>>,
}

impl PostCounter {
    pub fn new(repo: &Repository) -> Self {
        Self {
            posts: repo.post.clone(),
        }
    }

    pub async fn count_visible(
        &self,
        category_id: Uuid,
        viewer: &Viewer,
    ) -> ContentResult<u64> {
        let predicate = filter_for(viewer, Scope::PostsInCategory(category_id));

        self.posts.count(&predicate).await.map_err(|e| {
            error!(
                task = "count visible posts",
                category_id = category_id.to_string(),
                error = e.to_string()
            );
            e.into()
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use repository::{Field, MemoryCollection, Predicate};

    use super::*;
    use crate::error::ContentError;

    fn post(
        title: &str,
        is_publish: bool,
        user_id: Uuid,
        category_id: Uuid,
    ) -> PostEntity {
        PostEntity {
            title: title.to_string(),
            is_publish,
            user_id,
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    async fn seeded() -> (Arc<MemoryCollection<PostEntity>>, Uuid, Uuid) {
        let posts = Arc::new(MemoryCollection::<PostEntity>::new());
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let category_id = Uuid::new_v4();

        for p in [
            post("published", true, stranger, category_id),
            post("own draft", false, owner, category_id),
            post("foreign draft", false, stranger, category_id),
            post("elsewhere", true, owner, Uuid::new_v4()),
        ] {
            posts.insert(p).await.unwrap();
        }

        (posts, owner, category_id)
    }

    fn counter(posts: Arc<MemoryCollection<PostEntity>>) -> PostCounter {
        let mut repo = Repository::in_memory();
        repo.post = posts;
        PostCounter::new(&repo)
    }

    #[tokio::test]
    async fn test_count_depends_on_viewer() {
        // Arrange
        let (posts, owner, category_id) = seeded().await;
        let counter = counter(posts);

        // Act
        let anonymous = counter
            .count_visible(category_id, &Viewer::Anonymous)
            .await
            .unwrap();
        let as_owner = counter
            .count_visible(category_id, &Viewer::Owner(owner))
            .await
            .unwrap();

        // Assert
        assert_eq!(anonymous, 1);
        assert_eq!(as_owner, 2);
    }

    #[tokio::test]
    async fn test_owner_never_sees_fewer_than_anonymous() {
        let (posts, owner, category_id) = seeded().await;
        let counter = counter(posts);

        for viewer in [Viewer::Owner(owner), Viewer::Owner(Uuid::new_v4())] {
            let owner_count =
                counter.count_visible(category_id, &viewer).await.unwrap();
            let anonymous_count = counter
                .count_visible(category_id, &Viewer::Anonymous)
                .await
                .unwrap();
            assert!(owner_count >= anonymous_count);
        }
    }

    #[tokio::test]
    async fn test_count_reflects_publish_changes_immediately() {
        let (posts, _, category_id) = seeded().await;
        let counter = counter(posts.clone());

        let mut draft = posts
            .find_one(&Predicate::eq(Field::Title, "own draft"))
            .await
            .unwrap()
            .unwrap();
        draft.is_publish = true;
        posts.update(draft.id, draft).await.unwrap();

        let anonymous = counter
            .count_visible(category_id, &Viewer::Anonymous)
            .await
            .unwrap();
        assert_eq!(anonymous, 2);
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let (posts, _, category_id) = seeded().await;
        posts.set_fail_reads(true);
        let counter = counter(posts);

        let result = counter
            .count_visible(category_id, &Viewer::Anonymous)
            .await;

        assert!(matches!(result, Err(ContentError::StoreUnavailable(_))));
    }
}
