use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::filter::{Predicate, Value};
use crate::gateway::Gateway;
use crate::record::Record;
use crate::{RepositoryError, Response};

/// In-process collection used for tests and local runs.
///
/// Unique fields are checked under the write lock, so concurrent inserts of
/// the same name cannot both succeed.
#[derive(Debug)]
pub struct MemoryCollection<R> {
    records: RwLock<Vec<R>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl<R: Record> MemoryCollection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `find` and `count` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every following `insert`, `update` and `remove` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_reads(&self) -> Response<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(format!(
                "simulated read failure on {}",
                R::COLLECTION
            )));
        }
        Ok(())
    }

    fn check_writes(&self) -> Response<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(format!(
                "simulated write failure on {}",
                R::COLLECTION
            )));
        }
        Ok(())
    }
}

fn check_unique<R: Record>(records: &[R], candidate: &R) -> Response<()> {
    for field in R::UNIQUE {
        let value: Option<Value> = candidate.field(*field);
        let taken = records.iter().any(|r| {
            r.id() != candidate.id() && value.is_some() && r.field(*field) == value
        });
        if taken {
            return Err(RepositoryError::Conflict {
                message: format!("in {} write", R::COLLECTION),
                detail: format!("duplicate {field}"),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl<R: Record> Gateway<R> for MemoryCollection<R> {
    async fn find(&self, predicate: &Predicate) -> Response<Vec<R>> {
        self.check_reads()?;

        let records = self.records.read().await;
        let mut found: Vec<R> = records
            .iter()
            .filter(|r| predicate.matches(*r))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.ordering(b));

        Ok(found)
    }

    async fn count(&self, predicate: &Predicate) -> Response<u64> {
        self.check_reads()?;

        let records = self.records.read().await;
        Ok(records.iter().filter(|r| predicate.matches(*r)).count() as u64)
    }

    async fn insert(&self, mut record: R) -> Response<Uuid> {
        self.check_writes()?;

        let id = Uuid::new_v4();
        record.set_id(id);

        let mut records = self.records.write().await;
        check_unique(&records, &record)?;
        records.push(record);

        Ok(id)
    }

    async fn update(&self, id: Uuid, mut record: R) -> Response<()> {
        self.check_writes()?;

        record.set_id(id);

        let mut records = self.records.write().await;
        let Some(position) = records.iter().position(|r| r.id() == id) else {
            return Err(RepositoryError::NotFound {
                collection: R::COLLECTION,
                id,
            });
        };
        check_unique(&records, &record)?;
        records[position] = record;

        Ok(())
    }

    async fn remove(&self, predicate: &Predicate) -> Response<u64> {
        self.check_writes()?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !predicate.matches(r));

        Ok((before - records.len()) as u64)
    }
}
