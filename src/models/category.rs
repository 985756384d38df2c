use crate::entities::category_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Appetizers")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
