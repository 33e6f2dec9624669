//! # LDES Server Simulator
//!
//! HTTP front of the simulator. Fragments posted to `/ldes` are rewritten onto
//! the simulator's origin and served back from their local path in whatever
//! format the client accepts. Aliases answer with redirects, and `/` reports
//! what is stored and how often it was read.

pub mod config;
pub mod dto;
pub mod fetcher;
pub mod handlers;
pub mod negotiation;
pub mod routes;

use std::sync::Arc;

use ldesim_codec::RdfCodec;
use ldesim_domain::controller::FragmentController;
use ldesim_memory::InMemoryFragmentRepository;
use url::Url;

pub use fetcher::HttpContextFetcher;
pub use routes::create_router;

/// The controller as wired by the server
pub type Controller = FragmentController<InMemoryFragmentRepository, HttpContextFetcher>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub codec: RdfCodec,
    body_limit: usize,
}

impl AppState {
    pub fn new(controller: Controller, codec: RdfCodec, body_limit: usize) -> Self {
        Self {
            controller: Arc::new(controller),
            codec,
            body_limit,
        }
    }

    /// The configured origin, used when a request carries no `Host`
    pub fn base_url(&self) -> &Url {
        self.controller.service().base_url()
    }

    /// Largest accepted request body, in bytes
    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}
