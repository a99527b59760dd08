use axum::{Json, extract::State};
use tracing::error;

use super::super::AppState;

#[derive(serde::Deserialize)]
pub(crate) struct ToggleRequest {
    user: String,
    pos: String,
}

pub(crate) async fn set_state(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    match store.set_automation_state(&req.user, &req.pos).await {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": format!("automation is turned {} successfully", req.pos),
        })),
        Err(e) => {
            error!("state toggle failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}

#[derive(serde::Deserialize)]
pub(crate) struct UserIdRequest {
    user_id: String,
}

pub(crate) async fn recent_replies(
    State(state): State<AppState>,
    Json(req): Json<UserIdRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    match store.recent_replies(&req.user_id).await {
        Ok(replies) => Json(serde_json::json!({ "recent_replies": replies })),
        Err(e) => {
            error!("recent_replies read failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}

pub(crate) async fn drafts(
    State(state): State<AppState>,
    Json(req): Json<UserIdRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    match store.drafts(&req.user_id).await {
        Ok(drafts) => Json(serde_json::json!({ "drafts": drafts })),
        Err(e) => {
            error!("drafts read failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}

#[derive(serde::Deserialize)]
pub(crate) struct UserEmailRequest {
    email: String,
}

pub(crate) async fn user_by_email(
    State(state): State<AppState>,
    Json(req): Json<UserEmailRequest>,
) -> Json<serde_json::Value> {
    let Some(store) = state.store else {
        return Json(serde_json::json!({ "success": false, "error": "Store not configured" }));
    };

    match store.user_id_by_email(&req.email).await {
        Ok(user_id) => Json(serde_json::json!({ "user_id": user_id })),
        Err(e) => {
            error!("user lookup failed: {e:#}");
            Json(serde_json::json!({ "success": false, "error": e.to_string() }))
        }
    }
}
