//! School CRUD 接口

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::trace;

use super::helpers::{api_result, created_response, error_response, success_response};
use super::types::{MessageResponse, SchoolSaved};
use crate::services::{SchoolInput, SchoolService};

pub async fn create_school(
    service: web::Data<Arc<SchoolService>>,
    payload: web::Json<SchoolInput>,
) -> HttpResponse {
    match service.create(payload.into_inner()).await {
        Ok(school) => created_response(SchoolSaved {
            message: "School saved".to_string(),
            school,
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn list_schools(service: web::Data<Arc<SchoolService>>) -> HttpResponse {
    trace!("API: list schools");
    api_result(service.list().await)
}

pub async fn get_school(
    service: web::Data<Arc<SchoolService>>,
    path: web::Path<String>,
) -> HttpResponse {
    api_result(service.get(&path.into_inner()).await)
}

pub async fn update_school(
    service: web::Data<Arc<SchoolService>>,
    path: web::Path<String>,
    payload: web::Json<SchoolInput>,
) -> HttpResponse {
    match service.update(&path.into_inner(), payload.into_inner()).await {
        Ok(school) => success_response(SchoolSaved {
            message: "School updated".to_string(),
            school,
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn delete_school(
    service: web::Data<Arc<SchoolService>>,
    path: web::Path<String>,
) -> HttpResponse {
    match service.delete(&path.into_inner()).await {
        Ok(()) => success_response(MessageResponse {
            message: "School deleted".to_string(),
        }),
        Err(e) => error_response(&e),
    }
}

/// 学校路由 `/schools`
pub fn schools_routes() -> actix_web::Scope {
    web::scope("/schools")
        .route("", web::post().to(create_school))
        .route("", web::get().to(list_schools))
        .route("/{id}", web::get().to(get_school))
        .route("/{id}", web::put().to(update_school))
        .route("/{id}", web::delete().to(delete_school))
}
