#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use anyhow::Context;
use notice_board::api::MgmtState;
use notice_board::config::{Config, StorageBackend};
use notice_board::{AppBuilder, adapters, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    notice_board::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server", storage = ?config.storage.backend);
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown) = async {
        // Phase 1: Storage
        let mut builder = AppBuilder::new(config.clone());
        if config.storage.backend == StorageBackend::Postgres {
            let url = config
                .database
                .url
                .as_deref()
                .context("--database-url is required when --storage=postgres")?;
            let pool = adapters::database::connect_with_retry(&config.database, url).await?;
            notice_board::run_migrations(&pool).await?;
            builder = builder.with_database(pool);
        }

        let shutdown = CancellationToken::new();
        notice_board::spawn_signal_handler(shutdown.clone());

        // Phase 2: Component wiring
        let app = builder.build();

        // Phase 3: Listeners and routers
        let app_router = notice_board::api::app_router(config.clone(), app.notice_service, shutdown.clone());
        let mgmt_app = notice_board::api::mgmt_router(MgmtState { repository: app.repository });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, shutdown))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: Serve until a shutdown signal arrives
    let api_token = shutdown.clone();
    let api_server = axum::serve(api_listener, app_router)
        .with_graceful_shutdown(async move { api_token.cancelled().await });

    let mgmt_token = shutdown.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app)
        .with_graceful_shutdown(async move { mgmt_token.cancelled().await });

    let servers = async { tokio::try_join!(api_server, mgmt_server) };

    // Phase 5: Graceful shutdown, bounded by the configured timeout once the signal fires
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        result = servers => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = async {
            shutdown.cancelled().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            tracing::warn!("Timeout waiting for in-flight requests to finish.");
        }
    }

    tracing::info!("Server stopped");
    telemetry_guard.shutdown();
    Ok(())
}
