use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{error, trace};

use super::helpers::json_response;
use super::types::HealthStatus;
use crate::storage::SeaOrmStorage;

/// Health Service
///
/// 直接检查存储连通性，不经过业务 service。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> HttpResponse {
        trace!("Received health check request");

        let result = tokio::time::timeout(Duration::from_secs(5), storage.ping()).await;
        let error = match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some("timeout".to_string()),
        };

        let (status, code) = match error {
            None => ("healthy", StatusCode::OK),
            Some(ref e) => {
                error!("Storage health check failed: {}", e);
                ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
            }
        };

        json_response(
            code,
            &HealthStatus {
                status: status.to_string(),
                storage: storage.backend_name().to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                error,
            },
        )
    }
}

/// Health 路由 `/health`
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
