use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use bistro_pos_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{create_cors, AuthMiddleware},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let pool = std::sync::Arc::new(pool);

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.token_expires_in);

    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let menu_service = MenuService::new(pool.clone());
    let table_service = TableService::new(pool.clone());
    let order_service = OrderService::new(pool.clone(), config.pos.tax_rate);
    let payment_service = PaymentService::new(
        pool.clone(),
        order_service.clone(),
        config.pos.restaurant_name.clone(),
    );
    let dashboard_service = DashboardService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(menu_service.clone()))
            .app_data(web::Data::new(table_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(payment_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .configure(swagger_config)
            .configure(handlers::auth_config)
            .configure(handlers::dashboard_config)
            .configure(handlers::menu_config)
            .configure(handlers::category_config)
            .configure(handlers::order_config)
            .configure(handlers::table_config)
            .configure(handlers::billing_config)
            .configure(handlers::api_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
