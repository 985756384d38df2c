use crate::entities::{payment_entity, PaymentMethod};
use crate::models::{OrderItemResponse, OrderResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub order_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub reference_number: String,
    pub processed_by: Option<i64>,
    pub processed_at: DateTime<Utc>,
}

impl From<payment_entity::Model> for PaymentResponse {
    fn from(m: payment_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            amount: m.amount,
            method: m.method,
            reference_number: m.reference_number,
            processed_by: m.processed_by,
            processed_at: m.processed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    #[schema(example = "cash")]
    pub payment_method: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(example = 27.54)]
    pub amount: Decimal,
    #[serde(default)]
    pub reference_number: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillingResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

/// Read-only rendering data for the printable receipt.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceiptResponse {
    pub restaurant_name: String,
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub payment: Option<PaymentResponse>,
}
