//! Health check endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Check API health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.uptime_secs()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::{create_router, test_support::send};
    use crate::AppState;

    #[tokio::test]
    async fn test_health_ok() {
        let (status, body) = send(create_router(AppState::new()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
