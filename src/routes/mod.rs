// Route exports
pub mod marketplace;

use actix_web::{web, HttpResponse, Responder};

pub use marketplace::{AppState, FeedLimits};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index)).service(
        web::scope("/api/v1")
            .configure(marketplace::configure),
    );
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("UniTrade API is running.....")
}
