//! Anonymous press link handlers, addressed by token.
//!
//! Server-side failures are redacted before they reach the caller.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

use screener_service::press::{PasswordCheck, PressVideo};

use crate::dto::request::{TrackViewRequest, VerifyPasswordRequest};
use crate::dto::response::{ApiResponse, LinkValidationResponse};
use crate::error::{ApiResult, redact};
use crate::extractors::{AppJson, ClientMeta};
use crate::state::AppState;

/// Header carrying the link password on video requests.
pub const PASSWORD_HEADER: &str = "x-press-password";

/// GET /api/press/validate/{token}
pub async fn validate_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<LinkValidationResponse>> {
    let validation = state
        .access_service
        .validate(&token)
        .await
        .map_err(redact)?;

    Ok(Json(LinkValidationResponse::from(validation)))
}

/// POST /api/press/verify/{token}
pub async fn verify_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(req): AppJson<VerifyPasswordRequest>,
) -> ApiResult<Json<PasswordCheck>> {
    let check = state
        .access_service
        .verify_password(&token, &req.password)
        .await
        .map_err(redact)?;

    Ok(Json(check))
}

/// POST /api/press/track/{token}
///
/// The body is optional; `{"duration": seconds}` when the player reports it.
pub async fn track_view(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ClientMeta(client): ClientMeta,
    body: Option<AppJson<TrackViewRequest>>,
) -> ApiResult<Json<serde_json::Value>> {
    let duration = body.and_then(|AppJson(req)| req.duration);
    let receipt = state
        .access_service
        .track_view(&token, &client, duration)
        .await
        .map_err(redact)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "View tracked successfully",
        "data": receipt,
    })))
}

/// GET /api/press/video/{token}
pub async fn video(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<PressVideo>>> {
    let password = headers
        .get(PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());

    let video = state
        .access_service
        .video(&token, password)
        .await
        .map_err(redact)?;

    Ok(Json(ApiResponse::ok(video)))
}
