use std::sync::Arc;
use crate::entities::{
    menu_item_entity as menu_items, order_entity as orders, order_item_entity as order_items,
    table_entity as tables, OrderStatus, TableStatus,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{compute_totals, generate_order_number, OrderTotals};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

const ORDER_NUMBER_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct OrderService {
    pool: Arc<DatabaseConnection>,
    tax_rate: Decimal,
}

impl OrderService {
    pub fn new(pool: Arc<DatabaseConnection>, tax_rate: Decimal) -> Self {
        Self { pool, tax_rate }
    }

    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut find = orders::Entity::find();
        if let Some(raw_status) = &query.status {
            let status: OrderStatus = raw_status.parse().map_err(|_| {
                AppError::ValidationError(format!("Unknown order status: {raw_status}"))
            })?;
            find = find.filter(orders::Column::Status.eq(status));
        }

        let total = find.clone().count(&*self.pool).await? as i64;
        let rows = find
            .order_by_desc(orders::Column::CreatedAt)
            .offset(params.get_offset())
            .limit(params.get_limit())
            .all(&*self.pool)
            .await?;

        let table_numbers = self.table_numbers(&rows).await?;
        let items = rows
            .into_iter()
            .map(|o| {
                let table_number = o.table_id.and_then(|id| table_numbers.get(&id).copied());
                let mut response = OrderResponse::from(o);
                response.table_number = table_number;
                response
            })
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Creates an order with a fresh order number and, when a table is given,
    /// marks the table occupied. The whole creation is one transaction so a
    /// table cannot end up with two active orders.
    pub async fn create_order(
        &self,
        created_by: i64,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let table = match request.table_id {
            Some(table_id) => Some(self.free_table(&txn, table_id).await?),
            None => None,
        };

        let order_number = self.unique_order_number(&txn).await?;

        let now = Utc::now();
        let order = orders::ActiveModel {
            order_number: Set(order_number),
            table_id: Set(request.table_id),
            customer_name: Set(request.customer_name),
            status: Set(OrderStatus::Pending),
            subtotal: Set(Decimal::ZERO),
            tax_amount: Set(Decimal::ZERO),
            total: Set(Decimal::ZERO),
            notes: Set(request.notes),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let table_number = match table {
            Some(table) => {
                let number = table.number;
                let mut active = table.into_active_model();
                active.status = Set(TableStatus::Occupied);
                active.update(&txn).await?;
                Some(number)
            }
            None => None,
        };

        txn.commit().await?;

        let mut response = OrderResponse::from(order);
        response.table_number = table_number;
        Ok(response)
    }

    pub async fn get_order_detail(&self, order_id: i64) -> AppResult<OrderDetailResponse> {
        let order = self.find_order(&*self.pool, order_id).await?;
        let items = self.item_responses(&*self.pool, order_id).await?;

        let mut response = OrderResponse::from(order);
        response.table_number = match response.table_id {
            Some(table_id) => tables::Entity::find_by_id(table_id)
                .one(&*self.pool)
                .await?
                .map(|t| t.number),
            None => None,
        };

        Ok(OrderDetailResponse {
            order: response,
            items,
        })
    }

    /// Edits an order's details. Moving it to another table goes through the
    /// same free-table check as creation and swaps the occupancy over, all
    /// in one transaction.
    pub async fn update_order(
        &self,
        order_id: i64,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let order = self.find_order(&txn, order_id).await?;
        let previous_table_id = order.table_id;

        let mut active = order.into_active_model();
        if let Some(table_id) = request.table_id {
            if previous_table_id != Some(table_id) {
                let table = self.free_table(&txn, table_id).await?;
                let mut occupied = table.into_active_model();
                occupied.status = Set(TableStatus::Occupied);
                occupied.update(&txn).await?;
                if let Some(old_table_id) = previous_table_id {
                    self.release_table(&txn, old_table_id).await?;
                }
                active.table_id = Set(Some(table_id));
            }
        }
        if let Some(customer_name) = request.customer_name {
            active.customer_name = Set(customer_name);
        }
        if let Some(notes) = request.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now());

        let order = active.update(&txn).await?;
        txn.commit().await?;
        Ok(OrderResponse::from(order))
    }

    /// Explicit staff-driven status change. Terminal orders stay terminal;
    /// moving into `paid` or `cancelled` frees the assigned table.
    pub async fn update_status(&self, order_id: i64, raw_status: &str) -> AppResult<OrderStatus> {
        let status: OrderStatus = raw_status
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Unknown order status: {raw_status}")))?;

        let txn = self.pool.begin().await?;

        let order = self.find_order(&txn, order_id).await?;
        if !order.status.can_transition_to(status) {
            return Err(AppError::ValidationError(format!(
                "Order is {} and cannot change status",
                order.status
            )));
        }

        let table_id = order.table_id;
        let mut active = order.into_active_model();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        if status.releases_table() {
            if let Some(table_id) = table_id {
                self.release_table(&txn, table_id).await?;
            }
        }

        txn.commit().await?;
        Ok(status)
    }

    /// Adds a menu item to an order, merging with an existing line for the
    /// same item: quantity accumulates and non-empty special instructions
    /// replace the stored ones. Runs as one transaction together with the
    /// totals recalculation.
    pub async fn add_item(&self, request: AddItemRequest) -> AppResult<(Decimal, OrderTotals)> {
        if request.quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let order = self.find_order(&txn, request.order_id).await?;
        let menu_item = menu_items::Entity::find_by_id(request.menu_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

        let existing = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .filter(order_items::Column::MenuItemId.eq(menu_item.id))
            .one(&txn)
            .await?;

        let line = match existing {
            Some(line) => {
                let quantity = line.quantity + request.quantity;
                let mut active = line.into_active_model();
                active.quantity = Set(quantity);
                if !request.special_instructions.is_empty() {
                    active.special_instructions = Set(request.special_instructions);
                }
                active.update(&txn).await?
            }
            None => {
                order_items::ActiveModel {
                    order_id: Set(order.id),
                    menu_item_id: Set(menu_item.id),
                    quantity: Set(request.quantity),
                    // price snapshot; later menu price edits leave this line alone
                    unit_price: Set(menu_item.price),
                    special_instructions: Set(request.special_instructions),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let line_total = line.line_total();
        let totals = self.recalculate_totals(&txn, order).await?;

        txn.commit().await?;
        Ok((line_total, totals))
    }

    /// Recomputes and persists an order's totals from its current lines.
    /// Invoked on reads too, so billing never shows stale amounts.
    pub async fn refresh_totals(&self, order_id: i64) -> AppResult<OrderTotals> {
        let txn = self.pool.begin().await?;
        let order = self.find_order(&txn, order_id).await?;
        let totals = self.recalculate_totals(&txn, order).await?;
        txn.commit().await?;
        Ok(totals)
    }

    pub async fn item_responses<C: ConnectionTrait>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> AppResult<Vec<OrderItemResponse>> {
        let lines = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .order_by_asc(order_items::Column::Id)
            .all(conn)
            .await?;

        let menu_item_ids: Vec<i64> = lines.iter().map(|l| l.menu_item_id).collect();
        let names: HashMap<i64, String> = menu_items::Entity::find()
            .filter(menu_items::Column::Id.is_in(menu_item_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(lines
            .into_iter()
            .map(|line| {
                let name = names
                    .get(&line.menu_item_id)
                    .cloned()
                    .unwrap_or_default();
                OrderItemResponse::from_model(line, name)
            })
            .collect())
    }

    pub async fn find_order<C: ConnectionTrait>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> AppResult<orders::Model> {
        orders::Entity::find_by_id(order_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    pub(crate) async fn recalculate_totals<C: ConnectionTrait>(
        &self,
        conn: &C,
        order: orders::Model,
    ) -> AppResult<OrderTotals> {
        let lines = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .all(conn)
            .await?;
        let pairs: Vec<(i32, Decimal)> =
            lines.iter().map(|l| (l.quantity, l.unit_price)).collect();
        let totals = compute_totals(&pairs, self.tax_rate);

        let mut active = order.into_active_model();
        active.subtotal = Set(totals.subtotal);
        active.tax_amount = Set(totals.tax_amount);
        active.total = Set(totals.total);
        active.updated_at = Set(Utc::now());
        active.update(conn).await?;

        Ok(totals)
    }

    pub(crate) async fn release_table<C: ConnectionTrait>(
        &self,
        conn: &C,
        table_id: i64,
    ) -> AppResult<()> {
        if let Some(table) = tables::Entity::find_by_id(table_id).one(conn).await? {
            let mut active = table.into_active_model();
            active.status = Set(TableStatus::Available);
            active.update(conn).await?;
        }
        Ok(())
    }

    /// Looks up a table and rejects it while it still carries an active
    /// (not paid, not cancelled) order.
    async fn free_table<C: ConnectionTrait>(
        &self,
        conn: &C,
        table_id: i64,
    ) -> AppResult<tables::Model> {
        let table = tables::Entity::find_by_id(table_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Table not found".to_string()))?;

        let active_orders = orders::Entity::find()
            .filter(orders::Column::TableId.eq(table_id))
            .filter(orders::Column::Status.is_not_in([OrderStatus::Paid, OrderStatus::Cancelled]))
            .count(conn)
            .await?;
        if active_orders > 0 {
            return Err(AppError::ValidationError(format!(
                "Table {} already has an active order",
                table.number
            )));
        }
        Ok(table)
    }

    async fn unique_order_number<C: ConnectionTrait>(&self, conn: &C) -> AppResult<String> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let candidate = generate_order_number();
            let taken = orders::Entity::find()
                .filter(orders::Column::OrderNumber.eq(candidate.clone()))
                .one(conn)
                .await?
                .is_some();
            if !taken {
                return Ok(candidate);
            }
        }
        Err(AppError::InternalError(
            "Could not allocate a unique order number".to_string(),
        ))
    }

    async fn table_numbers(&self, rows: &[orders::Model]) -> AppResult<HashMap<i64, i32>> {
        let table_ids: Vec<i64> = rows.iter().filter_map(|o| o.table_id).collect();
        if table_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let map = tables::Entity::find()
            .filter(tables::Column::Id.is_in(table_ids))
            .all(&*self.pool)
            .await?
            .into_iter()
            .map(|t| (t.id, t.number))
            .collect();
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn pending_order(id: i64, table_id: Option<i64>) -> orders::Model {
        let now = Utc::now();
        orders::Model {
            id,
            order_number: format!("ORD2025083112000{id:04}"),
            table_id,
            customer_name: String::new(),
            status: OrderStatus::Pending,
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            notes: String::new(),
            created_by: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    fn table_row(id: i64, number: i32) -> tables::Model {
        tables::Model {
            id,
            number,
            seats: 4,
            status: TableStatus::Available,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_moving_order_to_a_busy_table_is_rejected() {
        // order lookup, then the target table lookup, then the active-order
        // count on that table
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending_order(1, None)]])
            .append_query_results([vec![table_row(5, 5)]])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .into_connection();

        let service = OrderService::new(Arc::new(pool), Decimal::new(8, 2));
        let err = service
            .update_order(
                1,
                UpdateOrderRequest {
                    table_id: Some(5),
                    customer_name: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
