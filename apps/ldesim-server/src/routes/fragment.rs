//! Fragment routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{
        fragment::{create_fragment_handler, get_fragment_handler},
        statistics::delete_all_handler,
    },
    AppState,
};

/// Create fragment routes
///
/// Any path not claimed by another route is a fragment read, query included.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ldes",
            post(create_fragment_handler)
                .delete(delete_all_handler)
                .get(get_fragment_handler),
        )
        .route("/*path", get(get_fragment_handler))
}
