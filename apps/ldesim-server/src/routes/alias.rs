//! Alias routes

use axum::{routing::post, Router};

use crate::{
    handlers::{alias::create_alias_handler, fragment::get_fragment_handler},
    AppState,
};

/// Create alias routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/alias",
        post(create_alias_handler).get(get_fragment_handler),
    )
}
