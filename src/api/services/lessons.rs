//! Lesson CRUD 接口

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use super::helpers::{api_result, created_response, error_response, success_response};
use super::types::{LessonSaved, MessageResponse};
use crate::services::{LessonInput, LessonService};

pub async fn create_lesson(
    service: web::Data<Arc<LessonService>>,
    payload: web::Json<LessonInput>,
) -> HttpResponse {
    match service.create(payload.into_inner()).await {
        Ok(lesson) => created_response(LessonSaved {
            message: "Lesson saved".to_string(),
            lesson,
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn list_lessons(service: web::Data<Arc<LessonService>>) -> HttpResponse {
    api_result(service.list().await)
}

pub async fn get_lesson(
    service: web::Data<Arc<LessonService>>,
    path: web::Path<String>,
) -> HttpResponse {
    api_result(service.get(&path.into_inner()).await)
}

pub async fn update_lesson(
    service: web::Data<Arc<LessonService>>,
    path: web::Path<String>,
    payload: web::Json<LessonInput>,
) -> HttpResponse {
    match service.update(&path.into_inner(), payload.into_inner()).await {
        Ok(lesson) => success_response(LessonSaved {
            message: "Lesson updated".to_string(),
            lesson,
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn delete_lesson(
    service: web::Data<Arc<LessonService>>,
    path: web::Path<String>,
) -> HttpResponse {
    match service.delete(&path.into_inner()).await {
        Ok(()) => success_response(MessageResponse {
            message: "Lesson deleted".to_string(),
        }),
        Err(e) => error_response(&e),
    }
}

/// 课程路由 `/lessons`
pub fn lessons_routes() -> actix_web::Scope {
    web::scope("/lessons")
        .route("", web::post().to(create_lesson))
        .route("", web::get().to(list_lessons))
        .route("/{id}", web::get().to(get_lesson))
        .route("/{id}", web::put().to(update_lesson))
        .route("/{id}", web::delete().to(delete_lesson))
}
