//! ldesim - LDES Server Simulator
//!
//! Serves fragments of a linked data event stream for testing clients:
//! posted fragments are moved onto the simulator's origin, aliases redirect,
//! and every direct read is counted.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ldesim_codec::RdfCodec;
use ldesim_domain::controller::FragmentController;
use ldesim_domain::fragment::FragmentService;
use ldesim_memory::InMemoryFragmentRepository;
use ldesim_server::{
    config::{Config, LogFormat},
    create_router, AppState, HttpContextFetcher,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let config = Config::parse();
    init_tracing(&config);

    let base_url = config.base_url().context("Invalid base URL")?;
    info!(
        host = %config.host,
        port = config.port,
        base_url = %base_url,
        max_body_size = config.max_body_size,
        seed = ?config.seed,
        "Starting LDES server simulator"
    );

    let fetcher = HttpContextFetcher::new(Duration::from_secs(config.context_timeout_secs))
        .context("Failed to build HTTP client")?;
    let service = FragmentService::with_context_fetcher(
        base_url,
        InMemoryFragmentRepository::new(),
        fetcher,
    );
    let controller = FragmentController::new(service);
    let codec = RdfCodec::new();

    // Seed before accepting requests so clients never see a partial store
    if let Some(directory) = &config.seed {
        match controller.seed(directory, &codec).await {
            Ok(seeded) => {
                let failed = seeded.iter().filter(|file| file.outcome.is_err()).count();
                info!(files = seeded.len(), failed, "Seeding finished");
            }
            Err(err) => error!(error = %err, "Seeding failed"),
        }
    }

    let state = AppState::new(controller, codec, config.max_body_size);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %listener.local_addr()?, "Simulator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Simulator stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into());

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received interrupt, shutting down"),
        Err(err) => {
            warn!(error = %err, "Failed to listen for interrupt");
            std::future::pending::<()>().await
        }
    }
}
