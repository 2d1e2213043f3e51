use actix_web::{get, Responder};

#[get("/")]
pub async fn health_check() -> impl Responder {
    "Welcome to the Early Access API v0.1.0!"
}
