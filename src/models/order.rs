use crate::entities::{order_entity, order_item_entity, OrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub table_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    pub customer_name: String,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub notes: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            table_id: m.table_id,
            table_number: None,
            customer_name: m.customer_name,
            status: m.status,
            subtotal: m.subtotal,
            tax_amount: m.tax_amount,
            total: m.total,
            notes: m.notes,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
    pub special_instructions: String,
}

impl OrderItemResponse {
    pub fn from_model(m: order_item_entity::Model, menu_item_name: String) -> Self {
        let line_total = m.line_total();
        Self {
            id: m.id,
            menu_item_id: m.menu_item_id,
            menu_item_name,
            quantity: m.quantity,
            unit_price: m.unit_price,
            line_total,
            special_instructions: m.special_instructions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub table_id: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub table_id: Option<i64>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub order_id: i64,
    pub menu_item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub special_instructions: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderTotalsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

fn default_quantity() -> i32 {
    1
}
