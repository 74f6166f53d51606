/// GET /health/ - Liveness probe. Served only once startup has finished.
pub async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "message": "API is healthy.",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
