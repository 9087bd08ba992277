pub mod analytics;
pub mod chat;
pub mod health;
pub mod helpers;
pub mod lessons;
pub mod links;
pub mod redirect;
pub mod schools;
pub mod types;

use actix_web::web;

pub use health::{HealthService, health_routes};
pub use helpers::json_error_handler;
pub use redirect::{RedirectService, redirect_routes};

/// JSON API 路由 `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(schools::schools_routes())
        .service(lessons::lessons_routes())
        .service(links::links_routes())
        .service(links::clicks_routes())
        .service(analytics::analytics_routes())
        .service(chat::chat_routes())
}
