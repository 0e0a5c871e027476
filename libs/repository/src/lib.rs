use std::sync::Arc;

use category::CategoryRepository;
use entity::prelude::*;
use migration::Migrator;
use migration::MigratorTrait;
use post::PostRepository;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use user::UserRepository;
use uuid::Uuid;

mod active_models;
pub mod category;
pub mod filter;
pub mod gateway;
pub mod memory;
pub mod post;
pub mod record;
mod response;
pub mod user;

pub use filter::{Field, Predicate, Value};
pub use gateway::Gateway;
pub use memory::MemoryCollection;
pub use record::Record;
pub use response::Response;

/// Handles to the three collections, constructed once and shared.
#[derive(Clone, Debug)]
pub struct Repository {
    pub category: Arc<dyn Gateway<CategoryEntity>>,
    pub post: Arc<dyn Gateway<PostEntity>>,
    pub user: Arc<dyn Gateway<UserEntity>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },

    #[error("unique constraint violated {}: {}", message, detail)]
    Conflict { message: String, detail: String },

    #[error("no record {} in {}", id, collection)]
    NotFound { collection: &'static str, id: Uuid },

    #[error("{} has no field {}", collection, field)]
    UnknownField {
        collection: &'static str,
        field: Field,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl Repository {
    pub async fn new(db_url: &str) -> Result<Self, RepositoryError> {
        let db = init_db(db_url).await?;

        Ok(Self::from_connection(db))
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            category: Arc::new(CategoryRepository::new(db.clone())),
            post: Arc::new(PostRepository::new(db.clone())),
            user: Arc::new(UserRepository::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            category: Arc::new(MemoryCollection::<CategoryEntity>::new()),
            post: Arc::new(MemoryCollection::<PostEntity>::new()),
            user: Arc::new(MemoryCollection::<UserEntity>::new()),
        }
    }
}

async fn init_db(db_url: &str) -> Result<DatabaseConnection, RepositoryError> {
    use response::IntoResponse;

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(5)
        .min_connections(1)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    Ok(db)
}
