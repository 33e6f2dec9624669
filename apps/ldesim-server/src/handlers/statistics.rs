//! Statistics and bulk-delete handlers

use axum::{extract::State, response::IntoResponse, Json};

use super::error_response;
use crate::{
    dto::{
        statistics::{DeleteAllResponse, StatisticsResponse},
        ErrorResponse,
    },
    AppState,
};

/// Known aliases, stored fragments and request counts
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Current simulator state", body = StatisticsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "statistics"
)]
pub async fn statistics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.statistics().await {
        Ok(statistics) => Json(StatisticsResponse::from(statistics)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Remove all fragments, aliases and statistics
#[utoipa::path(
    delete,
    path = "/ldes",
    responses(
        (status = 200, description = "Everything removed", body = DeleteAllResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "statistics"
)]
pub async fn delete_all_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.delete_all().await {
        Ok(summary) => Json(DeleteAllResponse::from(summary)).into_response(),
        Err(err) => error_response(err),
    }
}
