//! Health check handler

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
pub async fn health_handler() -> &'static str {
    "OK"
}
