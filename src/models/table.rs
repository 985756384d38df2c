use crate::entities::{table_entity, TableStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableResponse {
    pub id: i64,
    pub number: i32,
    pub seats: i32,
    pub status: TableStatus,
    pub created_at: DateTime<Utc>,
}

impl From<table_entity::Model> for TableResponse {
    fn from(m: table_entity::Model) -> Self {
        Self {
            id: m.id,
            number: m.number,
            seats: m.seats,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    #[schema(example = 12)]
    pub number: i32,
    #[serde(default = "default_seats")]
    pub seats: i32,
}

/// Raw incoming status; parsed against the recognized set so unknown values
/// are rejected without mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "occupied")]
    pub status: String,
}

fn default_seats() -> i32 {
    4
}
