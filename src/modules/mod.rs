pub mod companies;
pub mod employees;

use actix_web::{web, HttpResponse};

/// Wire up all HTTP routes. The employee scope is registered first so the
/// single-segment `/companies/{id}` routes do not claim its prefix.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api")
            .configure(employees::controllers::configure)
            .configure(companies::controllers::configure),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "orgdesk"
    }))
}
