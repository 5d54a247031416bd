use crate::models::HealthStatus;
use axum::Json;

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { ok: true })
}
