use crate::models::*;
use crate::services::MenuService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "category",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories")
    )
)]
pub async fn list_categories(menu_service: web::Data<MenuService>) -> Result<HttpResponse> {
    match menu_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories/add",
    tag = "category",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category added", body = CategoryResponse),
        (status = 400, description = "Invalid category")
    )
)]
pub async fn add_category(
    menu_service: web::Data<MenuService>,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    match menu_service.create_category(request.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": category,
            "message": "Category added successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("/add", web::post().to(add_category)),
    );
}
