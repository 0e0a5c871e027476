use std::cmp::Ordering;
use std::fmt::Debug;

use entity::prelude::*;
use uuid::Uuid;

use crate::filter::{Field, Value};

/// A record kept in one collection of the store.
pub trait Record: Debug + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Fields no two records of the collection may share.
    const UNIQUE: &'static [Field];

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    fn field(&self, field: Field) -> Option<Value>;

    /// Order in which `find` returns records.
    fn ordering(&self, other: &Self) -> Ordering;
}

impl Record for CategoryEntity {
    const COLLECTION: &'static str = "categories";
    const UNIQUE: &'static [Field] = &[Field::Name];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(self.id.into()),
            Field::Name => Some(self.name.as_str().into()),
            _ => None,
        }
    }

    fn ordering(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Record for PostEntity {
    const COLLECTION: &'static str = "posts";
    const UNIQUE: &'static [Field] = &[Field::Title];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(self.id.into()),
            Field::Title => Some(self.title.as_str().into()),
            Field::IsPublish => Some(self.is_publish.into()),
            Field::CategoryId => self.category_id.map(Value::from),
            Field::UserId => Some(self.user_id.into()),
            _ => None,
        }
    }

    // newest first
    fn ordering(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }
}

impl Record for UserEntity {
    const COLLECTION: &'static str = "users";
    const UNIQUE: &'static [Field] = &[Field::Username];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(self.id.into()),
            Field::Username => Some(self.username.as_str().into()),
            _ => None,
        }
    }

    fn ordering(&self, other: &Self) -> Ordering {
        self.username.cmp(&other.username)
    }
}
