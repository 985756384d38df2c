pub mod jwt;
pub mod order_number;
pub mod password;
pub mod totals;

pub use jwt::*;
pub use order_number::generate_order_number;
pub use password::{hash_password, validate_password, verify_password};
pub use totals::{compute_totals, OrderTotals};
