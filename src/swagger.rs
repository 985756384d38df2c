use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{OrderStatus, PaymentMethod, TableStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::dashboard::dashboard,
        handlers::menu::list_menu,
        handlers::menu::add_menu_item,
        handlers::menu::edit_menu_item,
        handlers::menu::delete_menu_item,
        handlers::menu::toggle_menu_item,
        handlers::category::list_categories,
        handlers::category::add_category,
        handlers::order::list_orders,
        handlers::order::new_order,
        handlers::order::order_detail,
        handlers::order::edit_order,
        handlers::order::update_order_status,
        handlers::table::list_tables,
        handlers::table::add_table,
        handlers::table::update_table_status,
        handlers::billing::billing,
        handlers::billing::process_payment,
        handlers::billing::receipt,
        handlers::api::get_menu_items,
        handlers::api::add_item_to_order,
        handlers::api::get_order_totals,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            CategoryResponse,
            CreateCategoryRequest,
            MenuItemResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            MenuItemBrief,
            TableResponse,
            CreateTableRequest,
            UpdateStatusRequest,
            TableStatus,
            OrderResponse,
            OrderDetailResponse,
            OrderItemResponse,
            CreateOrderRequest,
            UpdateOrderRequest,
            AddItemRequest,
            OrderTotalsResponse,
            OrderStatus,
            PaymentResponse,
            ProcessPaymentRequest,
            BillingResponse,
            ReceiptResponse,
            PaymentMethod,
            DashboardResponse,
            TopItem,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Staff authentication"),
        (name = "dashboard", description = "Today's activity overview"),
        (name = "menu", description = "Menu item management"),
        (name = "category", description = "Category management"),
        (name = "order", description = "Order taking and lifecycle"),
        (name = "table", description = "Table management"),
        (name = "billing", description = "Billing, payment and receipts"),
        (name = "api", description = "Order-taking AJAX endpoints")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
