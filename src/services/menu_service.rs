use std::sync::Arc;
use crate::entities::{category_entity as categories, menu_item_entity as menu_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct MenuService {
    pool: Arc<DatabaseConnection>,
}

impl MenuService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let rows = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Category name is required".to_string(),
            ));
        }

        let category = categories::ActiveModel {
            name: Set(name),
            description: Set(request.description),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(CategoryResponse::from(category))
    }

    /// Menu management listing: every item, annotated with its category name.
    pub async fn list_menu_items(&self) -> AppResult<Vec<MenuItemResponse>> {
        let items = menu_items::Entity::find()
            .order_by_asc(menu_items::Column::Name)
            .all(&*self.pool)
            .await?;
        let names = self.category_names().await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let category_name = names.get(&item.category_id).cloned();
                MenuItemResponse::from_model(item, category_name)
            })
            .collect())
    }

    pub async fn create_menu_item(&self, request: CreateMenuItemRequest) -> AppResult<MenuItemResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Menu item name is required".to_string(),
            ));
        }
        if request.price.is_sign_negative() {
            return Err(AppError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }

        let category = categories::Entity::find_by_id(request.category_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let now = Utc::now();
        let item = menu_items::ActiveModel {
            category_id: Set(category.id),
            name: Set(name),
            description: Set(request.description),
            price: Set(request.price.round_dp(2)),
            is_available: Set(request.is_available),
            image_url: Set(request.image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(MenuItemResponse::from_model(item, Some(category.name)))
    }

    pub async fn update_menu_item(
        &self,
        item_id: i64,
        request: UpdateMenuItemRequest,
    ) -> AppResult<MenuItemResponse> {
        let item = self.find_menu_item(item_id).await?;

        let mut active = item.into_active_model();
        if let Some(category_id) = request.category_id {
            categories::Entity::find_by_id(category_id)
                .one(&*self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
            active.category_id = Set(category_id);
        }
        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Menu item name is required".to_string(),
                ));
            }
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(price) = request.price {
            if price.is_sign_negative() {
                return Err(AppError::ValidationError(
                    "Price cannot be negative".to_string(),
                ));
            }
            // Existing order lines keep their snapshotted unit_price.
            active.price = Set(price.round_dp(2));
        }
        if let Some(is_available) = request.is_available {
            active.is_available = Set(is_available);
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(Some(image_url));
        }
        active.updated_at = Set(Utc::now());

        let item = active.update(&*self.pool).await?;
        let names = self.category_names().await?;
        let category_name = names.get(&item.category_id).cloned();
        Ok(MenuItemResponse::from_model(item, category_name))
    }

    pub async fn delete_menu_item(&self, item_id: i64) -> AppResult<()> {
        let item = self.find_menu_item(item_id).await?;
        menu_items::Entity::delete_by_id(item.id)
            .exec(&*self.pool)
            .await?;
        Ok(())
    }

    pub async fn toggle_menu_item(&self, item_id: i64) -> AppResult<MenuItemResponse> {
        let item = self.find_menu_item(item_id).await?;
        let now_available = !item.is_available;

        let mut active = item.into_active_model();
        active.is_available = Set(now_available);
        active.updated_at = Set(Utc::now());
        let item = active.update(&*self.pool).await?;

        let names = self.category_names().await?;
        let category_name = names.get(&item.category_id).cloned();
        Ok(MenuItemResponse::from_model(item, category_name))
    }

    /// Available items for order taking. With a category filter the category
    /// name is omitted from each line (the caller already knows it).
    pub async fn list_available_items(
        &self,
        category_id: Option<i64>,
    ) -> AppResult<Vec<MenuItemBrief>> {
        let mut query = menu_items::Entity::find()
            .filter(menu_items::Column::IsAvailable.eq(true))
            .order_by_asc(menu_items::Column::Name);
        if let Some(category_id) = category_id {
            query = query.filter(menu_items::Column::CategoryId.eq(category_id));
        }
        let items = query.all(&*self.pool).await?;

        let names = if category_id.is_none() {
            self.category_names().await?
        } else {
            HashMap::new()
        };

        Ok(items
            .into_iter()
            .map(|item| MenuItemBrief {
                id: item.id,
                name: item.name,
                price: item.price,
                description: item.description,
                category_name: names.get(&item.category_id).cloned(),
            })
            .collect())
    }

    async fn find_menu_item(&self, item_id: i64) -> AppResult<menu_items::Model> {
        menu_items::Entity::find_by_id(item_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))
    }

    async fn category_names(&self) -> AppResult<HashMap<i64, String>> {
        let rows = categories::Entity::find().all(&*self.pool).await?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }
}
