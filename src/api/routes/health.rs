use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "console",
        "env": state.env,
        "region": state.region,
        "version": crate::VERSION,
    }))
}
