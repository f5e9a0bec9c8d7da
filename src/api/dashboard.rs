//! Dashboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

use super::CurrentUser;

/// Circulation summary for the logged-in user
#[derive(Serialize, ToSchema)]
pub struct DashboardView {
    pub user: String,
    pub total: i64,
    pub issued: i64,
    pub available: i64,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Summary counts", body = DashboardView),
        (status = 303, description = "Not logged in, redirect to /")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<DashboardView>> {
    let summary = state.services.catalog.count_summary().await?;
    Ok(Json(DashboardView {
        user,
        total: summary.total,
        issued: summary.issued,
        available: summary.available,
    }))
}
