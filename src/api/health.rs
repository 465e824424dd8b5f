use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::error::AppError;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Ready once the vessel store answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let vessels = state.repo.count_vessels().await?;
    Ok(Json(json!({"status": "ready", "vessels": vessels})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
