pub mod auth_service;
pub mod dashboard_service;
pub mod menu_service;
pub mod order_service;
pub mod payment_service;
pub mod table_service;

pub use auth_service::*;
pub use dashboard_service::*;
pub use menu_service::*;
pub use order_service::*;
pub use payment_service::*;
pub use table_service::*;
