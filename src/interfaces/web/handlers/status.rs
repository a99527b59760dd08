use axum::Json;

pub(crate) async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "message": "telefwd relay active",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
