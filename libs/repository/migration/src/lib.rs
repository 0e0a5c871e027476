pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_user_table;
mod m20240601_000002_create_category_table;
mod m20240601_000003_create_post_table;
mod m20240601_000004_create_index_at_post;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_user_table::Migration),
            Box::new(m20240601_000002_create_category_table::Migration),
            Box::new(m20240601_000003_create_post_table::Migration),
            Box::new(m20240601_000004_create_index_at_post::Migration),
        ]
    }
}
