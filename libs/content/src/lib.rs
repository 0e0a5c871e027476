//! Content rules of the blog backend: who sees which posts, how category
//! names become categories, and how updates are applied to stored records.
//!
//! Everything here works against the [`repository::Gateway`] handles of a
//! [`Repository`]; nothing knows about HTTP or credentials.

use repository::Repository;

pub mod category;
pub mod count;
pub mod error;
pub mod merger;
pub mod post;
pub mod resolver;
pub mod user;
pub mod view;
pub mod visibility;

pub use category::CategoryService;
pub use count::PostCounter;
pub use error::{ContentError, ContentResult};
pub use merger::{MergedPost, UpdateMerger};
pub use post::PostService;
pub use resolver::{CategoryResolver, Resolved};
pub use user::UserService;
pub use view::{CategoryView, PostView, UserView};
pub use visibility::{filter_for, owned_by, Scope};

#[derive(Clone, Debug)]
pub struct Content {
    pub categories: CategoryService,
    pub posts: PostService,
    pub users: UserService,
}

impl Content {
    pub fn new(repo: &Repository) -> Self {
        Self {
            categories: CategoryService::new(repo),
            posts: PostService::new(repo),
            users: UserService::new(repo),
        }
    }
}
