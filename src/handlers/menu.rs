use crate::models::*;
use crate::services::MenuService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/menu",
    tag = "menu",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All menu items with their categories")
    )
)]
pub async fn list_menu(menu_service: web::Data<MenuService>) -> Result<HttpResponse> {
    let categories = match menu_service.list_categories().await {
        Ok(v) => v,
        Err(e) => return Ok(e.error_response()),
    };
    match menu_service.list_menu_items().await {
        Ok(menu_items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "categories": categories,
                "menu_items": menu_items
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menu/add",
    tag = "menu",
    security(("bearer_auth" = [])),
    request_body = CreateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item added", body = MenuItemResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn add_menu_item(
    menu_service: web::Data<MenuService>,
    request: web::Json<CreateMenuItemRequest>,
) -> Result<HttpResponse> {
    match menu_service.create_menu_item(request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": item,
            "message": "Menu item added successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menu/edit/{item_id}",
    tag = "menu",
    security(("bearer_auth" = [])),
    params(("item_id" = i64, Path, description = "Menu item id")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn edit_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<i64>,
    request: web::Json<UpdateMenuItemRequest>,
) -> Result<HttpResponse> {
    match menu_service
        .update_menu_item(path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": item,
            "message": "Menu item updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menu/delete/{item_id}",
    tag = "menu",
    security(("bearer_auth" = [])),
    params(("item_id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn delete_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.delete_menu_item(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Menu item deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menu/toggle/{item_id}",
    tag = "menu",
    security(("bearer_auth" = [])),
    params(("item_id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Availability flipped", body = MenuItemResponse),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn toggle_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.toggle_menu_item(path.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": item
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn menu_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/menu")
            .route("", web::get().to(list_menu))
            .route("/add", web::post().to(add_menu_item))
            .route("/edit/{item_id}", web::post().to(edit_menu_item))
            .route("/delete/{item_id}", web::post().to(delete_menu_item))
            .route("/toggle/{item_id}", web::post().to(toggle_menu_item)),
    );
}
