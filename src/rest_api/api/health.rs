use poem_openapi::payload::Json;

use crate::rest_api::api::{HealthResponse, HealthStatus};

/// Liveness only; never touches the model pool.
pub fn health() -> HealthResponse {
    HealthResponse::Ok(Json(HealthStatus {
        status: "ok".to_string(),
        message: "ADMEThyst microservice is running".to_string(),
    }))
}
