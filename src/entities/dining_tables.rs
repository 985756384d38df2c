use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "table_status")]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "occupied")]
    Occupied,
    #[sea_orm(string_value = "reserved")]
    Reserved,
    #[sea_orm(string_value = "cleaning")]
    Cleaning,
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Available => write!(f, "available"),
            TableStatus::Occupied => write!(f, "occupied"),
            TableStatus::Reserved => write!(f, "reserved"),
            TableStatus::Cleaning => write!(f, "cleaning"),
        }
    }
}

impl std::str::FromStr for TableStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            "cleaning" => Ok(TableStatus::Cleaning),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "dining_tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub number: i32,
    pub seats: i32,
    pub status: TableStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(TableStatus::from_str("available"), Ok(TableStatus::Available));
        assert_eq!(TableStatus::from_str("occupied"), Ok(TableStatus::Occupied));
        assert_eq!(TableStatus::from_str("reserved"), Ok(TableStatus::Reserved));
        assert_eq!(TableStatus::from_str("cleaning"), Ok(TableStatus::Cleaning));
    }

    #[test]
    fn test_parse_unknown_status_is_rejected() {
        assert!(TableStatus::from_str("broken").is_err());
        assert!(TableStatus::from_str("AVAILABLE").is_err());
        assert!(TableStatus::from_str("").is_err());
    }
}
