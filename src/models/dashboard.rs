use crate::models::{OrderResponse, TableResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopItem {
    pub menu_item_name: String,
    pub total_quantity: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    pub recent_orders: Vec<OrderResponse>,
    pub top_items: Vec<TopItem>,
    pub tables: Vec<TableResponse>,
}
