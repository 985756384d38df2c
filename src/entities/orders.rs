use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "served")]
    Served,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// `paid` and `cancelled` end the order's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Staff drive transitions explicitly; the only rule enforced is that a
    /// terminal order cannot move again.
    pub fn can_transition_to(&self, _target: OrderStatus) -> bool {
        !self.is_terminal()
    }

    /// Whether moving into this status releases the order's table.
    pub fn releases_table(&self) -> bool {
        self.is_terminal()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Ready => write!(f, "ready"),
            OrderStatus::Served => write!(f, "served"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            "paid" => Ok(OrderStatus::Paid),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_number: String,
    pub table_id: Option<i64>,
    pub customer_name: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub notes: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
        assert_eq!(OrderStatus::from_str("pending"), Ok(OrderStatus::Pending));
        assert_eq!(OrderStatus::from_str("paid"), Ok(OrderStatus::Paid));
        assert_eq!(OrderStatus::from_str("cancelled"), Ok(OrderStatus::Cancelled));
    }

    #[test]
    fn test_parse_unknown_status_is_rejected() {
        assert!(OrderStatus::from_str("done").is_err());
        assert!(OrderStatus::from_str("Paid").is_err());
        assert!(OrderStatus::from_str("").is_err());
    }

    #[test]
    fn test_terminal_states_allow_no_transition() {
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn test_cancelled_reachable_from_any_non_terminal() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
        ] {
            assert!(from.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_only_terminal_states_release_table() {
        assert!(OrderStatus::Paid.releases_table());
        assert!(OrderStatus::Cancelled.releases_table());
        assert!(!OrderStatus::Served.releases_table());
        assert!(!OrderStatus::Pending.releases_table());
    }
}
