//! 助手接口

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use super::helpers::api_result;
use crate::services::{ChatInput, ChatService};

pub async fn post_chat(
    service: web::Data<Arc<ChatService>>,
    payload: web::Json<ChatInput>,
) -> HttpResponse {
    api_result(service.reply(payload.message.as_deref()).await)
}

/// 助手路由 `/chat`
pub fn chat_routes() -> actix_web::Scope {
    web::scope("/chat").route("", web::post().to(post_chat))
}
