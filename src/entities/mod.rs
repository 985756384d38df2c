pub mod categories;
pub mod dining_tables;
pub mod menu_items;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod users;

pub use categories as category_entity;
pub use dining_tables as table_entity;
pub use menu_items as menu_item_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use payments as payment_entity;
pub use users as user_entity;

pub use dining_tables::TableStatus;
pub use orders::OrderStatus;
pub use payments::PaymentMethod;
