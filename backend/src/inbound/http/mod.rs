//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod geolocation;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

pub use error::ApiResult;

/// Upper bound for JSON request bodies.
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Register extractor configuration and every REST route.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
/// `/api/users/near` is registered ahead of `/api/users/{id}` so the literal
/// segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(error::json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
    .service(
        web::scope("/api")
            .service(users::list_users)
            .service(users::list_users_near)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(geolocation::validate_postal_code)
            .service(geolocation::lookup_postal_code),
    )
    .service(health::health)
    .service(health::ready)
    .service(health::live);
}

/// Fallback for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Route not found",
        "path": req.path(),
        "method": req.method().as_str(),
    }))
}
