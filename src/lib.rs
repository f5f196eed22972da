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

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::DbPool;
use crate::adapters::{InMemoryNoticeRepository, NoticeRepository, PgNoticeRepository};
use crate::config::{Config, StorageBackend};
use crate::services::NoticeService;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fully wired application components.
#[derive(Debug)]
pub struct App {
    pub notice_service: NoticeService,
    pub repository: Arc<dyn NoticeRepository>,
}

/// Wires the repository into the notice pipeline.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    repository: Option<Arc<dyn NoticeRepository>>,
}

impl AppBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, repository: None }
    }

    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn NoticeRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    #[must_use]
    pub fn with_database(self, pool: DbPool) -> Self {
        self.with_repository(Arc::new(PgNoticeRepository::new(pool)))
    }

    /// Finishes wiring. Without an explicit repository the in-memory store is used.
    #[must_use]
    pub fn build(self) -> App {
        let repository: Arc<dyn NoticeRepository> = match self.repository {
            Some(repository) => repository,
            None => {
                if self.config.storage.backend == StorageBackend::Postgres {
                    tracing::warn!("Postgres backend selected but no pool provided, falling back to memory");
                }
                Arc::new(InMemoryNoticeRepository::new())
            }
        };

        App { notice_service: NoticeService::new(Arc::clone(&repository)), repository }
    }
}

/// Applies pending migrations from `migrations/`.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Cancels `shutdown` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        shutdown.cancel();
    });
}

/// Routes panics through tracing so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();

        tracing::error!(panic.location = %location, panic.payload = %payload, "Panic occurred");
    }));
}
