use axum::Json;
use serde::Serialize;

use crate::utils::response::{message, MessageBody};

pub mod events;
pub mod participation;
pub mod reports;
pub mod students;

#[derive(Serialize)]
pub struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        service: "campus-events-api",
    })
}

pub async fn root() -> Json<MessageBody> {
    message("Welcome to Campus Event Manager!")
}
