use std::sync::Arc;
use crate::entities::{
    menu_item_entity as menu_items, order_entity as orders, order_item_entity as order_items,
    table_entity as tables,
};
use crate::error::AppResult;
use crate::models::*;
use chrono::{Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct DashboardService {
    pool: Arc<DatabaseConnection>,
}

impl DashboardService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// Today's order count and sales, the latest orders, the top sellers of
    /// the day and every table's status in one payload.
    pub async fn get_dashboard(&self) -> AppResult<DashboardResponse> {
        let day_start = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        let day_end = day_start + Duration::days(1);

        let todays = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(day_start))
            .filter(orders::Column::CreatedAt.lt(day_end));

        let total_orders = todays.clone().count(&*self.pool).await? as i64;

        #[derive(Debug, FromQueryResult)]
        struct SalesRow {
            total_sales: Option<Decimal>,
        }
        let total_sales = todays
            .clone()
            .select_only()
            .column_as(orders::Column::Total.sum(), "total_sales")
            .into_model::<SalesRow>()
            .one(&*self.pool)
            .await?
            .and_then(|r| r.total_sales)
            .unwrap_or(Decimal::ZERO);

        let recent_orders = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .limit(10)
            .all(&*self.pool)
            .await?
            .into_iter()
            .map(OrderResponse::from)
            .collect();

        let top_items = self.top_items_today(day_start, day_end).await?;

        let table_rows = tables::Entity::find()
            .order_by_asc(tables::Column::Number)
            .all(&*self.pool)
            .await?
            .into_iter()
            .map(TableResponse::from)
            .collect();

        Ok(DashboardResponse {
            total_orders,
            total_sales,
            recent_orders,
            top_items,
            tables: table_rows,
        })
    }

    async fn top_items_today(
        &self,
        day_start: chrono::DateTime<Utc>,
        day_end: chrono::DateTime<Utc>,
    ) -> AppResult<Vec<TopItem>> {
        let todays_order_ids: Vec<i64> = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(day_start))
            .filter(orders::Column::CreatedAt.lt(day_end))
            .all(&*self.pool)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        if todays_order_ids.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(Debug, FromQueryResult)]
        struct TopItemRow {
            menu_item_id: i64,
            total_quantity: i64,
        }
        let mut rows = order_items::Entity::find()
            .select_only()
            .column(order_items::Column::MenuItemId)
            .column_as(order_items::Column::Quantity.sum(), "total_quantity")
            .filter(order_items::Column::OrderId.is_in(todays_order_ids))
            .group_by(order_items::Column::MenuItemId)
            .into_model::<TopItemRow>()
            .all(&*self.pool)
            .await?;
        rows.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        rows.truncate(5);

        let names: HashMap<i64, String> = menu_items::Entity::find()
            .filter(menu_items::Column::Id.is_in(rows.iter().map(|r| r.menu_item_id).collect::<Vec<_>>()))
            .all(&*self.pool)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| TopItem {
                menu_item_name: names.get(&row.menu_item_id).cloned().unwrap_or_default(),
                total_quantity: row.total_quantity,
            })
            .collect())
    }
}
