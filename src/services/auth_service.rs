use std::sync::Arc;
use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_password, verify_password, JwtService};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: Arc<DatabaseConnection>,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: Arc<DatabaseConnection>, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::ValidationError("Username is required".to_string()));
        }
        validate_password(&request.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username.clone()))
            .one(&*self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Username is already taken".to_string(),
            ));
        }

        let display_name = if request.display_name.trim().is_empty() {
            username.clone()
        } else {
            request.display_name.trim().to_string()
        };

        let user = users::ActiveModel {
            username: Set(username),
            password_hash: Set(hash_password(&request.password)?),
            display_name: Set(display_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        self.auth_response(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.trim()))
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        self.auth_response(user)
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(UserResponse::from(user))
    }

    fn auth_response(&self, user: users::Model) -> AppResult<AuthResponse> {
        let token = self.jwt_service.generate_token(user.id, &user.username)?;
        Ok(AuthResponse {
            token,
            expires_in: self.jwt_service.token_expires_in(),
            user: UserResponse::from(user),
        })
    }
}
