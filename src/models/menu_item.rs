use crate::entities::menu_item_entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItemResponse {
    pub fn from_model(m: menu_item_entity::Model, category_name: Option<String>) -> Self {
        Self {
            id: m.id,
            category_id: m.category_id,
            category_name,
            name: m.name,
            description: m.description,
            price: m.price,
            is_available: m.is_available,
            image_url: m.image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub category_id: i64,
    #[schema(example = "Margherita Pizza")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(example = 12.50)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Line shape of the order-taking item picker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemBrief {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemsQuery {
    pub category_id: Option<i64>,
}

fn default_true() -> bool {
    true
}
