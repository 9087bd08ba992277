//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{api_routes, health_routes, json_error_handler, redirect_routes};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime::{self, StartupContext};

/// 请求体上限
const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 关闭时使用浏览器默认同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(cors_config.max_age);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// 注册 service 与路由，服务器和集成测试共用
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext) {
    cfg.app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.school_service.clone()))
        .app_data(web::Data::new(ctx.lesson_service.clone()))
        .app_data(web::Data::new(ctx.link_service.clone()))
        .app_data(web::Data::new(ctx.click_recorder.clone()))
        .app_data(web::Data::new(ctx.analytics_service.clone()))
        .app_data(web::Data::new(ctx.chat_service.clone()))
        .app_data(
            web::JsonConfig::default()
                .limit(MAX_PAYLOAD_BYTES)
                .error_handler(json_error_handler),
        )
        .service(api_routes())
        .service(health_routes())
        .service(redirect_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let config = get_config();
    let cors_config = config.cors.clone();
    let storage_for_shutdown = startup.storage.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.server.trusted_proxies.is_empty() {
        warn!("No trusted proxies configured, X-Forwarded-For will be ignored");
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);
        let ctx = startup.clone();

        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Connection", "keep-alive")))
            .configure(|cfg| configure_app(cfg, &ctx))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    warn!("Starting server at http://{}", bind_address);
    let server = server.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(storage_for_shutdown) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
