//! Health check reporting database and cache reachability.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use super::AppState;

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

/// Health check response
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    cache: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: HEALTHY,
                error: None,
            },
            Err(e) => Self {
                status: UNHEALTHY,
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

/// `200 healthy` when both backends answer, otherwise `503 degraded`.
pub(crate) async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_result(state.database.ping().await);
    let cache = ServiceStatus::from_result(state.cache.exists("health_check").await.map(|_| ()));

    let all_healthy = database.is_healthy() && cache.is_healthy();
    if !all_healthy {
        tracing::warn!("Health check degraded");
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, cache },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
