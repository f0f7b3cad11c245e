//! Static landing page

use actix_web::{HttpResponse, Responder, get, web};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Configure landing page route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
