//! HTTP handlers

pub mod alias;
pub mod fragment;
pub mod health;
pub mod statistics;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ldesim_domain::fragment::FragmentError;
use tracing::error;

use crate::dto::ErrorResponse;

/// Map a domain error onto its HTTP status
pub(crate) fn error_response(err: FragmentError) -> Response {
    let status = match &err {
        FragmentError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
        FragmentError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
        FragmentError::AliasCycle { .. } => StatusCode::CONFLICT,
        FragmentError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        FragmentError::SeedFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = ?err, "Request failed");
    }

    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
