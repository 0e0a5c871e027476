use async_trait::async_trait;
use uuid::Uuid;

use crate::filter::Predicate;
use crate::record::Record;
use crate::Response;

/// Filtered CRUD over one collection of records.
///
/// Every call either completes or fails outright; nothing is retried.
#[async_trait]
pub trait Gateway<R: Record>: std::fmt::Debug + Send + Sync {
    async fn find(&self, predicate: &Predicate) -> Response<Vec<R>>;

    async fn count(&self, predicate: &Predicate) -> Response<u64>;

    /// Stores `record` under a freshly assigned id and returns that id.
    async fn insert(&self, record: R) -> Response<Uuid>;

    /// Overwrites the record stored under `id`.
    async fn update(&self, id: Uuid, record: R) -> Response<()>;

    /// Removes every matching record and returns how many were removed.
    async fn remove(&self, predicate: &Predicate) -> Response<u64>;

    async fn find_one(&self, predicate: &Predicate) -> Response<Option<R>> {
        Ok(self.find(predicate).await?.into_iter().next())
    }
}
