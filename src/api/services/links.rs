//! 链接与点击接口

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

use super::helpers::{api_result, created_response, error_response, request_base_url};
use super::types::LinkCreated;
use crate::config::get_config;
use crate::services::{ClickRecorder, CreateLinkInput, LinkService, redirect_url};

pub async fn create_link(
    req: HttpRequest,
    service: web::Data<Arc<LinkService>>,
    payload: web::Json<CreateLinkInput>,
) -> HttpResponse {
    match service.create_link(payload.into_inner()).await {
        Ok(link) => {
            let config = get_config();
            let base = request_base_url(&req, config.server.public_base_url.as_deref());
            let url = redirect_url(&base, &link.id);
            info!("Generated link: {}", url);
            created_response(LinkCreated::new(link, url))
        }
        Err(e) => error_response(&e),
    }
}

pub async fn list_links(service: web::Data<Arc<LinkService>>) -> HttpResponse {
    api_result(service.list_links().await)
}

pub async fn list_clicks(recorder: web::Data<Arc<ClickRecorder>>) -> HttpResponse {
    api_result(recorder.list_clicks().await)
}

/// 链接路由 `/links`
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::post().to(create_link))
        .route("", web::get().to(list_links))
}

/// 点击路由 `/clicks`
pub fn clicks_routes() -> actix_web::Scope {
    web::scope("/clicks").route("", web::get().to(list_clicks))
}
