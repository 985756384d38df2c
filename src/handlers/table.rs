use crate::models::*;
use crate::services::TableService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/tables",
    tag = "table",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tables, ordered by number")
    )
)]
pub async fn list_tables(table_service: web::Data<TableService>) -> Result<HttpResponse> {
    match table_service.list_tables().await {
        Ok(tables) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tables
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/tables/add",
    tag = "table",
    security(("bearer_auth" = [])),
    request_body = CreateTableRequest,
    responses(
        (status = 200, description = "Table created", body = TableResponse),
        (status = 400, description = "Duplicate or invalid table number")
    )
)]
pub async fn add_table(
    table_service: web::Data<TableService>,
    request: web::Json<CreateTableRequest>,
) -> Result<HttpResponse> {
    match table_service.create_table(request.into_inner()).await {
        Ok(table) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": table,
            "message": "Table created successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/tables/{table_id}/status",
    tag = "table",
    security(("bearer_auth" = [])),
    params(("table_id" = i64, Path, description = "Table id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn update_table_status(
    table_service: web::Data<TableService>,
    path: web::Path<i64>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    match table_service
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

pub fn table_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tables")
            .route("", web::get().to(list_tables))
            .route("/add", web::post().to(add_table))
            .route("/{table_id}/status", web::post().to(update_table_status)),
    );
}
