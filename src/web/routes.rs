use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/chat", web::post().to(handlers::chat))
            .route("/clear", web::post().to(handlers::clear))
            .route("/history", web::get().to(handlers::history))
            .route("/models", web::get().to(handlers::models))
    )
    .route("/", web::get().to(handlers::index))
    .route("/chat", web::post().to(handlers::chat_form))
    .route("/clear", web::post().to(handlers::clear_form))
    .route("/health", web::get().to(handlers::health_check));
}
