//! Structured predicates over record fields.
//!
//! A predicate is evaluated directly against in-memory records or compiled
//! into a sea-orm [`Condition`] for the Postgres gateways.

use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::record::Record;
use crate::{RepositoryError, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Title,
    IsPublish,
    CategoryId,
    UserId,
    Username,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Id(Uuid),
    Text(String),
    Bool(bool),
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Id(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Value> for sea_orm::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Id(id) => id.into(),
            Value::Text(text) => text.into(),
            Value::Bool(flag) => flag.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    All,
    Eq(Field, Value),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Eq(field, value.into())
    }

    pub fn id(id: Uuid) -> Self {
        Predicate::eq(Field::Id, id)
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    /// Conjunction that flattens nested `And`s and drops `All`.
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// A record that lacks `field` never satisfies `Eq` on it.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Eq(field, value) => {
                record.field(*field).as_ref() == Some(value)
            }
            Predicate::And(predicates) => {
                predicates.iter().all(|p| p.matches(record))
            }
            Predicate::Or(predicates) => {
                predicates.iter().any(|p| p.matches(record))
            }
        }
    }

    pub(crate) fn into_condition<C, F>(
        &self,
        collection: &'static str,
        column: &F,
    ) -> Response<Condition>
    where
        C: ColumnTrait,
        F: Fn(Field) -> Option<C>,
    {
        let condition = match self {
            Predicate::All => Condition::all(),
            Predicate::Eq(field, value) => {
                let column = column(*field).ok_or(
                    RepositoryError::UnknownField {
                        collection,
                        field: *field,
                    },
                )?;
                Condition::all().add(column.eq(value.clone()))
            }
            Predicate::And(predicates) => {
                let mut condition = Condition::all();
                for p in predicates {
                    condition = condition.add(p.into_condition(collection, column)?);
                }
                condition
            }
            Predicate::Or(predicates) => {
                let mut condition = Condition::any();
                for p in predicates {
                    condition = condition.add(p.into_condition(collection, column)?);
                }
                condition
            }
        };

        Ok(condition)
    }
}
