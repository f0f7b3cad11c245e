pub mod chat;
pub mod error;
pub mod health;
pub mod landing;
pub mod openapi;

use actix_web::web;

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(landing::configure)
        .configure(chat::configure)
        .configure(health::configure)
        .configure(openapi::configure);
}
