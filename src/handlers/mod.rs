pub mod api;
pub mod auth;
pub mod billing;
pub mod category;
pub mod dashboard;
pub mod menu;
pub mod order;
pub mod table;

pub use api::api_config;
pub use auth::auth_config;
pub use billing::billing_config;
pub use category::category_config;
pub use dashboard::dashboard_config;
pub use menu::menu_config;
pub use order::order_config;
pub use table::table_config;
