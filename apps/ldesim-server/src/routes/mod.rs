//! API routes

pub mod alias;
pub mod fragment;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    dto::{
        alias::{CreateAliasRequest, RedirectionResponse},
        fragment::FragmentCreatedResponse,
        statistics::{DeleteAllResponse, ResponseCountResponse, StatisticsResponse},
        ErrorResponse,
    },
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::fragment::create_fragment_handler,
        handlers::fragment::get_fragment_handler,
        handlers::alias::create_alias_handler,
        handlers::statistics::statistics_handler,
        handlers::statistics::delete_all_handler,
        handlers::health::health_handler
    ),
    components(
        schemas(
            FragmentCreatedResponse,
            CreateAliasRequest,
            RedirectionResponse,
            StatisticsResponse,
            ResponseCountResponse,
            DeleteAllResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "fragment", description = "Storing and serving fragments"),
        (name = "alias", description = "Redirects between fragment URLs"),
        (name = "statistics", description = "Simulator state"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "LDES Server Simulator API",
        version = "0.1.0",
        description = "Serves linked data event stream fragments under the simulator's own origin"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        .route("/", get(handlers::statistics::statistics_handler))
        .route("/health", get(handlers::health::health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .merge(alias::routes())
        .merge(fragment::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
