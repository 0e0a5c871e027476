use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use entity::prelude::*;
use repository::{Field, Gateway, Predicate, Repository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::count::PostCounter;
use crate::error::{ContentError, ContentResult, IntoContentResult};
use crate::merger::{require_text, UpdateMerger};
use crate::resolver::Resolved;
use crate::view::{CategoryView, PostView, UserView};
use crate::visibility::{filter_for, owned_by, Scope};

#[derive(Clone, Debug)]
pub struct PostService {
    posts: Arc<dyn Gateway<PostEntity>>,
    categories: Arc<dyn Gateway<CategoryEntity>>,
    users: Arc<dyn Gateway<UserEntity>>,
    counter: PostCounter,
    merger: UpdateMerger,
}

/// Lookups shared by the posts of one response.
#[derive(Default)]
struct ViewCache {
    categories: HashMap<Uuid, Option<CategoryView>>,
    users: HashMap<Uuid, Option<UserView>>,
}

impl PostService {
    pub fn new(repo: &Repository) -> Self {
        Self {
            posts: repo.post.clone(),
            categories: repo.category.clone(),
            users: repo.user.clone(),
            counter: PostCounter::new(repo),
            merger: UpdateMerger::new(repo),
        }
    }

    pub async fn list(&self, viewer: &Viewer) -> ContentResult<Vec<PostView>> {
        let posts = self
            .posts
            .find(&filter_for(viewer, Scope::AllPosts))
            .await?;
        self.views(posts, viewer).await
    }

    pub async fn get(&self, id: Uuid, viewer: &Viewer) -> ContentResult<PostView> {
        let post = self
            .posts
            .find_one(&filter_for(viewer, Scope::SinglePost(id)))
            .await?
            .ok_or(ContentError::NotFound { kind: "post" })?;

        let mut cache = ViewCache::default();
        self.view(post, viewer, &mut cache).await
    }

    pub async fn list_in_category(
        &self,
        category_id: Uuid,
        viewer: &Viewer,
    ) -> ContentResult<Vec<PostView>> {
        self.category(category_id).await?;

        let posts = self
            .posts
            .find(&filter_for(viewer, Scope::PostsInCategory(category_id)))
            .await?;
        self.views(posts, viewer).await
    }

    /// Creates a post owned by `owner`, resolving its category by name.
    ///
    /// A category created for this post is removed again when the post
    /// cannot be stored.
    pub async fn create(
        &self,
        owner: Uuid,
        payload: PostPayload,
    ) -> ContentResult<PostView> {
        let draft = self.draft(owner, &payload).await?;

        let category_name = payload.category_name.unwrap_or_default();
        let resolved = self.merger.resolver().resolve(&category_name).await?;

        let post = PostEntity {
            category_id: resolved.map(|r| r.id),
            ..draft
        };
        self.insert(post, resolved, &category_name).await
    }

    /// Creates a post in the existing category `category_id`. Any category
    /// name in the payload is ignored.
    pub async fn create_in_category(
        &self,
        owner: Uuid,
        category_id: Uuid,
        payload: PostPayload,
    ) -> ContentResult<PostView> {
        self.category(category_id).await?;
        let draft = self.draft(owner, &payload).await?;

        let post = PostEntity {
            category_id: Some(category_id),
            ..draft
        };
        self.insert(post, None, "").await
    }

    /// Only posts owned by `owner` are addressable.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: PostPayload,
        mode: UpdateMode,
    ) -> ContentResult<PostView> {
        let existing = self
            .posts
            .find_one(&owned_by(owner, Scope::SinglePost(id)))
            .await?
            .ok_or(ContentError::NotFound { kind: "post" })?;

        let existing_category = match existing.category_id {
            Some(category_id) => self
                .categories
                .find_one(&Predicate::id(category_id))
                .await?
                .map(|c| c.name),
            None => None,
        };

        let category_name = payload.category_name.clone().unwrap_or_default();
        let merged = self
            .merger
            .merge_post(&existing, existing_category.as_deref(), payload, mode)
            .await?;
        let post = merged.post;

        match self.title_taken(&post.title, Some(id)).await {
            Ok(false) => {}
            Ok(true) => {
                self.merger.resolver().release(merged.category).await;
                return Err(ContentError::DuplicateName {
                    kind: "post",
                    name: post.title,
                });
            }
            Err(e) => {
                self.merger.resolver().release(merged.category).await;
                return Err(e);
            }
        }

        let written = self.posts.update(id, post.clone()).await;
        if let Err(e) = &written {
            warn!(
                task = "update post",
                id = id.to_string(),
                error = e.to_string()
            );
            self.merger.resolver().release(merged.category).await;
        }
        written.or_duplicate("post", &post.title)?;
        let post = self
            .confirm_category(post, merged.category, &category_name)
            .await?;

        let mut cache = ViewCache::default();
        self.view(post, &Viewer::Owner(owner), &mut cache).await
    }

    /// Removing a post that is absent or owned by someone else is a no-op.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> ContentResult<()> {
        let removed = self
            .posts
            .remove(&owned_by(owner, Scope::SinglePost(id)))
            .await?;
        if removed > 0 {
            info!(task = "delete post", id = id.to_string());
        }
        Ok(())
    }

    /// Validates a new post and returns it without a category.
    async fn draft(
        &self,
        owner: Uuid,
        payload: &PostPayload,
    ) -> ContentResult<PostEntity> {
        let title =
            require_text(payload.title.as_deref().unwrap_or_default(), "title")?;
        let is_publish = payload.is_publish.value().ok_or_else(|| {
            ContentError::InvalidContent("is_publish is required".to_string())
        })?;

        if self.title_taken(&title, None).await? {
            return Err(ContentError::DuplicateName {
                kind: "post",
                name: title,
            });
        }

        let now = Utc::now();
        Ok(PostEntity {
            title,
            content: payload.content.clone().unwrap_or_default(),
            is_publish,
            tags: payload.tags.clone().unwrap_or_default(),
            user_id: owner,
            created_at: now,
            updated_at: now,
            ..Default::default()
        })
    }

    async fn insert(
        &self,
        post: PostEntity,
        resolved: Option<Resolved>,
        category_name: &str,
    ) -> ContentResult<PostView> {
        let inserted = self.posts.insert(post.clone()).await;
        if let Err(e) = &inserted {
            warn!(
                task = "create post",
                title = post.title,
                error = e.to_string()
            );
            self.merger.resolver().release(resolved).await;
        }
        let id = inserted.or_duplicate("post", &post.title)?;
        info!(task = "create post", title = post.title, id = id.to_string());

        let post = self
            .confirm_category(PostEntity { id, ..post }, resolved, category_name)
            .await?;

        let owner = post.user_id;
        let mut cache = ViewCache::default();
        self.view(post, &Viewer::Owner(owner), &mut cache).await
    }

    /// Points a freshly written post at a live category when the resolved
    /// one was removed before the write landed.
    async fn confirm_category(
        &self,
        mut post: PostEntity,
        resolved: Option<Resolved>,
        category_name: &str,
    ) -> ContentResult<PostEntity> {
        let Some(resolved) = resolved else {
            return Ok(post);
        };

        let confirmed =
            self.merger.resolver().confirm(resolved, category_name).await?;
        let category_id = confirmed.map(|r| r.id);
        if category_id != post.category_id {
            post.category_id = category_id;
            self.posts
                .update(post.id, post.clone())
                .await
                .or_duplicate("post", &post.title)?;
        }
        Ok(post)
    }

    async fn category(&self, id: Uuid) -> ContentResult<CategoryEntity> {
        self.categories
            .find_one(&Predicate::id(id))
            .await?
            .ok_or(ContentError::NotFound { kind: "category" })
    }

    async fn title_taken(
        &self,
        title: &str,
        except: Option<Uuid>,
    ) -> ContentResult<bool> {
        let holders = self.posts.find(&Predicate::eq(Field::Title, title)).await?;
        Ok(holders.iter().any(|p| Some(p.id) != except))
    }

    async fn views(
        &self,
        posts: Vec<PostEntity>,
        viewer: &Viewer,
    ) -> ContentResult<Vec<PostView>> {
        let mut cache = ViewCache::default();
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.view(post, viewer, &mut cache).await?);
        }
        Ok(views)
    }

    async fn view(
        &self,
        post: PostEntity,
        viewer: &Viewer,
        cache: &mut ViewCache,
    ) -> ContentResult<PostView> {
        let category = match post.category_id {
            Some(id) => match cache.categories.get(&id) {
                Some(view) => view.clone(),
                None => {
                    let view = self.category_view(id, viewer).await?;
                    cache.categories.insert(id, view.clone());
                    view
                }
            },
            None => None,
        };

        let user = match cache.users.get(&post.user_id) {
            Some(view) => view.clone(),
            None => {
                let view = self
                    .users
                    .find_one(&Predicate::id(post.user_id))
                    .await?
                    .as_ref()
                    .map(UserView::from);
                cache.users.insert(post.user_id, view.clone());
                view
            }
        };

        Ok(PostView::new(post, category, user))
    }

    async fn category_view(
        &self,
        id: Uuid,
        viewer: &Viewer,
    ) -> ContentResult<Option<CategoryView>> {
        let Some(category) =
            self.categories.find_one(&Predicate::id(id)).await?
        else {
            return Ok(None);
        };
        let post_count = self.counter.count_visible(id, viewer).await?;
        Ok(Some(CategoryView::new(category, post_count)))
    }
}
