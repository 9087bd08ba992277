//! `/r/{link_id}`：解析 → 记录点击 → 302 跳转

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use super::helpers::error_response;
use crate::config::get_config;
use crate::services::{ClickRecorder, LinkService};
use crate::utils::ip::extract_client_ip;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
        recorder: web::Data<Arc<ClickRecorder>>,
    ) -> HttpResponse {
        let link_id = path.into_inner();

        let resolution = match link_service.resolve(&link_id).await {
            Ok(resolution) => resolution,
            Err(e) => return error_response(&e),
        };

        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok());
        let client_ip = extract_client_ip(&req, &get_config().server.trusted_proxies);

        // 点击写入失败则整个跳转失败
        if let Err(e) = recorder
            .record_click(&resolution, user_agent, client_ip.as_deref())
            .await
        {
            return error_response(&e);
        }

        debug!("Redirecting {} -> {}", link_id, resolution.destination);

        HttpResponse::Found()
            .insert_header((header::LOCATION, resolution.destination))
            .insert_header((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
            .finish()
    }
}

/// 跳转路由 `/r`
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/r").route("/{link_id}", web::get().to(RedirectService::handle_redirect))
}
