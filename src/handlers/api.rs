use crate::models::*;
use crate::services::{MenuService, OrderService};
use actix_web::{web, HttpResponse, ResponseError, Result};
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/menu-items",
    tag = "api",
    security(("bearer_auth" = [])),
    params(("category_id" = Option<i64>, Query, description = "Restrict to one category")),
    responses(
        (status = 200, description = "Available menu items")
    )
)]
pub async fn get_menu_items(
    menu_service: web::Data<MenuService>,
    query: web::Query<MenuItemsQuery>,
) -> Result<HttpResponse> {
    match menu_service.list_available_items(query.category_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({ "menu_items": items }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/add-to-order",
    tag = "api",
    security(("bearer_auth" = [])),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Line upserted, totals recomputed"),
        (status = 404, description = "Order or menu item not found")
    )
)]
pub async fn add_item_to_order(
    order_service: web::Data<OrderService>,
    request: web::Json<AddItemRequest>,
) -> Result<HttpResponse> {
    match order_service.add_item(request.into_inner()).await {
        Ok((line_total, totals)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "item_total": line_total.to_f64().unwrap_or(0.0),
            "order_subtotal": totals.subtotal.to_f64().unwrap_or(0.0),
            "order_tax": totals.tax_amount.to_f64().unwrap_or(0.0),
            "order_total": totals.total.to_f64().unwrap_or(0.0)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/order-totals/{order_id}",
    tag = "api",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Totals recomputed on read", body = OrderTotalsResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order_totals(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.refresh_totals(path.into_inner()).await {
        Ok(totals) => Ok(HttpResponse::Ok().json(OrderTotalsResponse {
            subtotal: totals.subtotal,
            tax: totals.tax_amount,
            total: totals.total,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/menu-items", web::get().to(get_menu_items))
            .route("/add-to-order", web::post().to(add_item_to_order))
            .route("/order-totals/{order_id}", web::get().to(get_order_totals)),
    );
}
