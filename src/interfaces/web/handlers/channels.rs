use axum::{
    Json,
    extract::{Query, State},
};
use tracing::error;

use super::super::AppState;
use super::string_or_number;

#[derive(serde::Deserialize)]
pub(crate) struct AddChannelRequest {
    user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    source: String,
    #[serde(deserialize_with = "string_or_number")]
    target: String,
}

pub(crate) async fn add_channel(
    State(state): State<AppState>,
    Json(req): Json<AddChannelRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    let record = match store.find_by_user(&req.user_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Json(serde_json::json!({ "success": false, "error": "User not found" }));
        }
        Err(e) => {
            error!("add_channel read failed: {e:#}");
            return Json(serde_json::json!({ "success": false, "error": e.to_string() }));
        }
    };

    let mut sources = record.source_channels;
    let mut targets = record.target_channels;
    sources.push(req.source);
    targets.push(req.target);

    match store.update_channels(&req.user_id, sources, targets).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "created successfully" })),
        Err(e) => {
            error!("add_channel write failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}

#[derive(serde::Deserialize)]
pub(crate) struct EditChannelRequest {
    user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    source_value: String,
    #[serde(deserialize_with = "string_or_number")]
    target_value: String,
    index: usize,
}

pub(crate) async fn edit_channel(
    State(state): State<AppState>,
    Json(req): Json<EditChannelRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    let record = match store.find_by_user(&req.user_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Json(serde_json::json!({ "success": false, "error": "User not found" }));
        }
        Err(e) => {
            error!("edit_channel read failed: {e:#}");
            return Json(serde_json::json!({ "success": false, "error": e.to_string() }));
        }
    };

    let mut sources = record.source_channels;
    let mut targets = record.target_channels;
    if req.index >= sources.len() || req.index >= targets.len() {
        return Json(serde_json::json!({ "success": false, "error": "Invalid index" }));
    }
    sources[req.index] = req.source_value;
    targets[req.index] = req.target_value;

    match store.update_channels(&req.user_id, sources, targets).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "edited successfully" })),
        Err(e) => {
            error!("edit_channel write failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}

#[derive(serde::Deserialize)]
pub(crate) struct DeleteChannelQuery {
    id: i64,
    user_id: String,
}

pub(crate) async fn delete_channel(
    State(state): State<AppState>,
    Query(query): Query<DeleteChannelQuery>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    let record = match store.find_by_user(&query.user_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Json(serde_json::json!({ "success": false, "error": "User not found" }));
        }
        Err(e) => {
            error!("del_channel read failed: {e:#}");
            return Json(serde_json::json!({ "success": false, "error": e.to_string() }));
        }
    };

    let mut sources = record.source_channels;
    let mut targets = record.target_channels;
    let pair_count = sources.len().min(targets.len());
    // Only index-aligned pairs are deletable; trailing unmatched entries stay.
    if query.id < 0 || query.id as usize >= pair_count {
        return Json(serde_json::json!({ "success": false, "error": "Invalid index" }));
    }
    sources.remove(query.id as usize);
    targets.remove(query.id as usize);

    match store.update_channels(&query.user_id, sources, targets).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "deleted successfully" })),
        Err(e) => {
            error!("del_channel write failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}
