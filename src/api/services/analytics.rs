//! 分析报表接口

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::trace;

use super::helpers::{api_result, error_response};
use crate::services::{AnalyticsFilter, AnalyticsQuery, AnalyticsService};

pub async fn get_analytics(
    service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<AnalyticsQuery>,
) -> HttpResponse {
    trace!("API: analytics query {:?}", query);

    let filter = match AnalyticsFilter::parse(query.into_inner()) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    api_result(service.get_analytics(&filter).await)
}

/// 分析路由 `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics").route("", web::get().to(get_analytics))
}
