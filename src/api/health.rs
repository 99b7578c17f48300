use actix_web::{HttpResponse, Responder, get};

/// Liveness check; does not touch the chain lock.
#[get("/health/")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("biometric chain is up ⛓️")
}
