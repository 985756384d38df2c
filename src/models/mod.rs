pub mod category;
pub mod dashboard;
pub mod menu_item;
pub mod order;
pub mod pagination;
pub mod payment;
pub mod table;
pub mod user;

pub use category::*;
pub use dashboard::*;
pub use menu_item::*;
pub use order::*;
pub use pagination::*;
pub use payment::*;
pub use table::*;
pub use user::*;
