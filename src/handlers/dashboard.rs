use crate::models::DashboardResponse;
use crate::services::DashboardService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Today's activity overview", body = DashboardResponse)
    )
)]
pub async fn dashboard(dashboard_service: web::Data<DashboardService>) -> Result<HttpResponse> {
    match dashboard_service.get_dashboard().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard));
}
