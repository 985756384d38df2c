use std::sync::Arc;
use crate::entities::{table_entity as tables, TableStatus};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct TableService {
    pool: Arc<DatabaseConnection>,
}

impl TableService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    pub async fn list_tables(&self) -> AppResult<Vec<TableResponse>> {
        let rows = tables::Entity::find()
            .order_by_asc(tables::Column::Number)
            .all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(TableResponse::from).collect())
    }

    pub async fn create_table(&self, request: CreateTableRequest) -> AppResult<TableResponse> {
        if request.number <= 0 {
            return Err(AppError::ValidationError(
                "Table number must be positive".to_string(),
            ));
        }
        if request.seats <= 0 {
            return Err(AppError::ValidationError(
                "Seat count must be positive".to_string(),
            ));
        }

        let existing = tables::Entity::find()
            .filter(tables::Column::Number.eq(request.number))
            .one(&*self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Table {} already exists",
                request.number
            )));
        }

        let table = tables::ActiveModel {
            number: Set(request.number),
            seats: Set(request.seats),
            status: Set(TableStatus::Available),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(TableResponse::from(table))
    }

    /// Staff set table statuses freely; only unrecognized values are
    /// rejected, and those without mutating the stored status.
    pub async fn update_status(&self, table_id: i64, raw_status: &str) -> AppResult<TableStatus> {
        let status: TableStatus = raw_status
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Unknown table status: {raw_status}")))?;

        let table = tables::Entity::find_by_id(table_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Table not found".to_string()))?;

        let mut active = table.into_active_model();
        active.status = Set(status);
        active.update(&*self.pool).await?;

        Ok(status)
    }
}
