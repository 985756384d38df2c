use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A table may carry at most one active (not paid, not cancelled) order.
        // Partial index, so raw SQL.
        let sql = r#"
            CREATE UNIQUE INDEX idx_orders_one_active_per_table
            ON orders (table_id)
            WHERE table_id IS NOT NULL AND status NOT IN ('paid', 'cancelled')
        "#;
        manager.get_connection().execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX idx_orders_one_active_per_table")
            .await?;
        Ok(())
    }
}
