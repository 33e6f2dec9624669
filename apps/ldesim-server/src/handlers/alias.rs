//! Alias handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ldesim_domain::controller::AliasRequest;
use tracing::info;

use super::error_response;
use crate::{
    dto::{
        alias::{CreateAliasRequest, RedirectionResponse},
        ErrorResponse,
    },
    AppState,
};

/// Make one URL redirect to another
#[utoipa::path(
    post,
    path = "/alias",
    request_body = CreateAliasRequest,
    responses(
        (status = 201, description = "Alias stored", body = RedirectionResponse),
        (status = 400, description = "Alias or original is not an absolute URL", body = ErrorResponse),
        (status = 409, description = "Alias would redirect to itself", body = ErrorResponse)
    ),
    tag = "alias"
)]
pub async fn create_alias_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateAliasRequest>,
) -> impl IntoResponse {
    info!(alias = %payload.alias, original = %payload.original, "Received alias request");

    match state.controller.post_alias(&AliasRequest::from(payload)) {
        Ok(redirection) => (
            StatusCode::CREATED,
            Json(RedirectionResponse::from(redirection)),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
