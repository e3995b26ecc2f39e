use std::collections::HashMap;

use actix_web::{get, http::StatusCode, web::Data, HttpResponse};

use serde::{Deserialize, Serialize};

use super::consts::{FAIL, FAILED_STATUS, MIME, PASS, SUCCESSFUL_STATUS};
use crate::components::app::AppComponents;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ComponentHealthStatus {
    pub status: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub details: HashMap<String, ComponentHealthStatus>,
    pub status: String,
}

pub async fn is_app_healthy(app_data: Data<AppComponents>) -> HttpResponse {
    let checks = app_data.health.calculate_status().await;
    let is_ready = !checks
        .values()
        .any(|value| value.status.eq_ignore_ascii_case(FAIL));

    let (status_code, status) = if is_ready {
        (SUCCESSFUL_STATUS, PASS)
    } else {
        (FAILED_STATUS, FAIL)
    };

    let response = ReadinessResponse {
        details: checks,
        status: status.to_string(),
    };

    HttpResponse::build(
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .content_type(MIME)
    .json(response)
}

/// Readiness: whether the store answers. An unready instance stays alive but
/// should stop receiving traffic.
#[get("/health/ready")]
pub async fn health(app_data: Data<AppComponents>) -> HttpResponse {
    is_app_healthy(app_data).await
}

#[get("/health/startup")]
pub async fn startup(app_data: Data<AppComponents>) -> HttpResponse {
    is_app_healthy(app_data).await
}

#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json("alive")
}
