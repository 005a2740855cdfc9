//! Reusable reservation server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: it constructs the store and
//! service, binds the HTTP listener, serves the API and shuts it down
//! gracefully. The CLI binary and the integration tests both start the
//! service through it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::application::ReservationManager;
use crate::config::AppConfig;
use crate::domain::{ReservationRepository, SharedReservationService};
use crate::infrastructure::InMemoryReservationStore;
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the reservation service.
#[derive(Default)]
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Store to serve; a fresh in-memory store when `None`.
    pub repository: Option<Arc<dyn ReservationRepository>>,
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running reservation service.
///
/// # Examples
///
/// ```rust,no_run
/// use reservation_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Reservation operations, shared with the HTTP adapter.
    pub service: SharedReservationService,
    /// Backing store.
    pub repository: Arc<dyn ReservationRepository>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the listener is actually bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the reservation service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus recorder (if metrics are enabled)
    /// 2. Build the store and reservation service
    /// 3. Bind and serve the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting reservation service...");

        let prometheus_handle = if app_cfg.metrics.enabled {
            Some(prometheus_handle()?)
        } else {
            None
        };

        // ── Store & Service ────────────────────────────────────
        let repository: Arc<dyn ReservationRepository> = opts
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryReservationStore::new()));
        let service: SharedReservationService =
            Arc::new(ReservationManager::new(repository.clone()));

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(service.clone(), repository.clone(), prometheus_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Reservation service started.");

        Ok(Self {
            service,
            repository,
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to drain after shutdown has been triggered,
    /// aborting it once the configured timeout elapses.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let Self {
            shutdown,
            mut api_task,
            ..
        } = self;

        let task = &mut api_task;
        let drained = shutdown
            .shutdown_with_cleanup(move || async move {
                if let Err(e) = task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;

        if !drained {
            warn!("Aborting REST API server");
            api_task.abort();
        }

        info!("👋 Reservation service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down reservation service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    let mut slot = PROM_HANDLE
        .lock()
        .map_err(|_| "metrics recorder lock poisoned")?;
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    *slot = Some(handle.clone());
    Ok(handle)
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
