pub use sea_orm_migration::prelude::*;

mod m20250830_000001_initial;
mod m20250830_000002_one_active_order_per_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250830_000001_initial::Migration),
            Box::new(m20250830_000002_one_active_order_per_table::Migration),
        ]
    }
}
