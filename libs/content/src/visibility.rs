//! Which posts a viewer is allowed to see.
//!
//! Anonymous readers see published posts only. An owner additionally sees
//! their own unpublished posts:
//!
//! ```text
//! (is_publish = true AND scope) OR (is_publish = false AND user_id = owner AND scope)
//! ```

use entity::prelude::*;
use repository::{Field, Predicate};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    AllPosts,
    PostsInCategory(Uuid),
    SinglePost(Uuid),
}

impl Scope {
    fn predicate(self) -> Predicate {
        match self {
            Scope::AllPosts => Predicate::All,
            Scope::PostsInCategory(id) => Predicate::eq(Field::CategoryId, id),
            Scope::SinglePost(id) => Predicate::id(id),
        }
    }
}

pub fn filter_for(viewer: &Viewer, scope: Scope) -> Predicate {
    let published = Predicate::eq(Field::IsPublish, true).and(scope.predicate());

    match viewer {
        Viewer::Anonymous => published,
        Viewer::Owner(user_id) => Predicate::any(vec![
            published,
            Predicate::eq(Field::IsPublish, false)
                .and(Predicate::eq(Field::UserId, *user_id))
                .and(scope.predicate()),
        ]),
    }
}

/// Posts `owner` may write to, regardless of publish state.
pub fn owned_by(owner: Uuid, scope: Scope) -> Predicate {
    scope.predicate().and(Predicate::eq(Field::UserId, owner))
}

#[cfg(test)]
mod test {
    use repository::Value;

    use super::*;

    #[test]
    fn test_anonymous_sees_published_only() {
        let post_id = Uuid::new_v4();

        let predicate = filter_for(&Viewer::Anonymous, Scope::SinglePost(post_id));

        assert_eq!(
            predicate,
            Predicate::And(vec![
                Predicate::Eq(Field::IsPublish, Value::Bool(true)),
                Predicate::Eq(Field::Id, Value::Id(post_id)),
            ])
        );
    }

    #[test]
    fn test_anonymous_all_posts_has_no_scope_clause() {
        let predicate = filter_for(&Viewer::Anonymous, Scope::AllPosts);

        assert_eq!(predicate, Predicate::eq(Field::IsPublish, true));
    }

    #[test]
    fn test_owner_also_sees_own_drafts() {
        // Arrange
        let owner = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let scope = Scope::PostsInCategory(category_id);

        // Act
        let predicate = filter_for(&Viewer::Owner(owner), scope);

        // Assert
        assert_eq!(
            predicate,
            Predicate::Or(vec![
                Predicate::And(vec![
                    Predicate::eq(Field::IsPublish, true),
                    Predicate::eq(Field::CategoryId, category_id),
                ]),
                Predicate::And(vec![
                    Predicate::eq(Field::IsPublish, false),
                    Predicate::eq(Field::UserId, owner),
                    Predicate::eq(Field::CategoryId, category_id),
                ]),
            ])
        );
    }

    #[test]
    fn test_owned_by_ignores_publish_state() {
        let owner = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        assert_eq!(
            owned_by(owner, Scope::SinglePost(post_id)),
            Predicate::And(vec![
                Predicate::id(post_id),
                Predicate::eq(Field::UserId, owner),
            ])
        );
    }
}
