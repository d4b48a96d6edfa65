//! Admin press link handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_core::types::PressLinkId;

use crate::dto::request::{CreatePressLinkRequest, ListPressLinksQuery, UpdatePressLinkRequest};
use crate::dto::response::{
    ApiResponse, CreatedPressLinkResponse, MessageResponse, PressLinkListResponse,
    PressLinkResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, AppJson};
use crate::state::AppState;

/// POST /api/press/admin
pub async fn create_link(
    State(state): State<AppState>,
    admin: AdminUser,
    AppJson(req): AppJson<CreatePressLinkRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CreatedPressLinkResponse>>)> {
    let created = state
        .press_service
        .create(&admin, req.into_input()?)
        .await?;

    let body = CreatedPressLinkResponse::new(created, state.clock.now(), state.base_url());
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(body))))
}

/// GET /api/press/admin?status=&limit=
pub async fn list_links(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<ListPressLinksQuery>,
) -> ApiResult<Json<ApiResponse<PressLinkListResponse>>> {
    let list = state
        .press_service
        .list(&admin, query.status_filter()?, query.limit)
        .await?;

    let body = PressLinkListResponse::new(list, state.clock.now(), state.base_url());
    Ok(Json(ApiResponse::ok(body)))
}

/// GET /api/press/admin/{id}
pub async fn get_link(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<PressLinkResponse>>> {
    let link = state.press_service.get(&admin, parse_id(&id)?).await?;
    let body = PressLinkResponse::new(link, state.clock.now(), state.base_url());
    Ok(Json(ApiResponse::ok(body)))
}

/// PATCH /api/press/admin/{id}
pub async fn update_link(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdatePressLinkRequest>,
) -> ApiResult<Json<ApiResponse<PressLinkResponse>>> {
    let id = parse_id(&id)?;
    let link = state
        .press_service
        .update(&admin, id, req.into_input()?)
        .await?;

    let body = PressLinkResponse::new(link, state.clock.now(), state.base_url());
    Ok(Json(ApiResponse::ok(body)))
}

/// DELETE /api/press/admin/{id}
///
/// Soft delete: the link stays stored with `active = false`.
pub async fn deactivate_link(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .press_service
        .deactivate(&admin, parse_id(&id)?)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Press link deactivated successfully",
    ))))
}

fn parse_id(raw: &str) -> AppResult<PressLinkId> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid press link id: {raw}")))
}
