use crate::error::AppError;
use crate::models::*;
use crate::services::PaymentService;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/billing/{order_id}",
    tag = "billing",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with freshly recomputed totals", body = BillingResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn billing(
    payment_service: web::Data<PaymentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match payment_service.get_billing(path.into_inner()).await {
        Ok(bill) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bill
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/payment/{order_id}",
    tag = "billing",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Insufficient amount or already paid"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn process_payment(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ProcessPaymentRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_user_id_from_request(&req) else {
        return Ok(AppError::AuthError("Not authenticated".to_string()).error_response());
    };
    match payment_service
        .process_payment(path.into_inner(), user_id, request.into_inner())
        .await
    {
        Ok(payment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": payment,
            "message": "Payment processed successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/receipt/{order_id}",
    tag = "billing",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Printable receipt data", body = ReceiptResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn receipt(
    payment_service: web::Data<PaymentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match payment_service.get_receipt(path.into_inner()).await {
        Ok(receipt) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": receipt
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn billing_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/billing/{order_id}", web::get().to(billing))
        .route("/payment/{order_id}", web::post().to(process_payment))
        .route("/receipt/{order_id}", web::get().to(receipt));
}
