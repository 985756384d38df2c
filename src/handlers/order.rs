use crate::error::AppError;
use crate::models::*;
use crate::services::OrderService;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by order status")
    ),
    responses(
        (status = 200, description = "Orders, newest first"),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/new",
    tag = "order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Table already has an active order"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn new_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_user_id_from_request(&req) else {
        return Ok(AppError::AuthError("Not authenticated".to_string()).error_response());
    };
    match order_service.create_order(user_id, request.into_inner()).await {
        Ok(order) => {
            let message = format!("Order {} created successfully", order.order_number);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": order,
                "message": message
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    tag = "order",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its lines", body = OrderDetailResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn order_detail(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.get_order_detail(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{order_id}/edit",
    tag = "order",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn edit_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service
        .update_order(path.into_inner(), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order,
            "message": "Order updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{order_id}/status",
    tag = "order",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Unknown status or terminal order"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    match order_service
        .update_status(path.into_inner(), &request.status)
        .await
    {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "status": status.to_string()
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("/new", web::post().to(new_order))
            .route("/{order_id}", web::get().to(order_detail))
            .route("/{order_id}/edit", web::post().to(edit_order))
            .route("/{order_id}/status", web::post().to(update_order_status)),
    );
}
