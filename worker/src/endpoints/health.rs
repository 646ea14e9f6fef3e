use actix_web::{get, HttpResponse, Responder};

/// Liveness probe `/health`
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
