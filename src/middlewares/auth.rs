use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

// Routes reachable without a bearer token.
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/auth/register",
                "/auth/login",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflights pass through.
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let path = req.path();
        if self.public_paths.is_public_path(path) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req.headers().get("Authorization");

        let token = if let Some(auth_value) = auth_header {
            if let Ok(auth_str) = auth_value.to_str() {
                auth_str.strip_prefix("Bearer ")
            } else {
                None
            }
        } else {
            None
        };

        if let Some(token) = token {
            match self
                .jwt_service
                .verify_token(token)
                .ok()
                .and_then(|claims| claims.sub.parse::<i64>().ok())
            {
                Some(user_id) => {
                    // Staff id travels in request extensions; handlers pass
                    // it into services explicitly.
                    req.extensions_mut().insert(user_id);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                None => {
                    let error = AppError::AuthError("Invalid access token".to_string());
                    Box::pin(async move { Err(error.into()) })
                }
            }
        } else {
            let error = AppError::AuthError("Missing access token".to_string());
            Box::pin(async move { Err(error.into()) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpRequest, HttpResponse};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct RawClaims {
        sub: String,
        username: String,
        exp: i64,
        iat: i64,
    }

    fn token_with_subject(sub: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = RawClaims {
            sub: sub.to_string(),
            username: "alice".to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn echo_staff_id(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<i64>() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::Ok().body("none"),
        }
    }

    #[actix_web::test]
    async fn test_numeric_subject_reaches_handler() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new(SECRET, 3600)))
                .route("/whoami", web::get().to(echo_staff_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_with_subject("7")),
            ))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "7");
    }

    #[actix_web::test]
    async fn test_malformed_subject_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new(SECRET, 3600)))
                .route("/whoami", web::get().to(echo_staff_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_with_subject("not-a-number")),
            ))
            .to_request();
        assert!(test::try_call_service(&app, req).await.is_err());
    }
}
