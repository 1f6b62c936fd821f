//! # Volunteer Hub Server
//!
//! The registration API built on `Axum` and `SurrealDB`.
//!
//! ## Example
//! ```no_run
//! use vhub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(3000)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use vhub::domain::config::{ApiConfig, LoggerConfig};
use vhub::domain::environment::Environment;
use vhub::kernel::server::ApiState;
use vhub_database::Database;
use vhub_logger::{LogFormat, Logger, LoggerBuilder};

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    environment: Environment,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// The environment detected at startup, reported by `/api/environment`.
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder = Database::builder()
            .url(&db_cfg.url)
            .session(&db_cfg.namespace, &db_cfg.database)
            .schemas(vhub::schemas());

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.build().context("Invalid database configuration")
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Creates the database handle and tries to connect once
    /// 2. Registers the feature slices
    /// 3. Constructs application state
    ///
    /// A failed connection is logged and does not stop the server; volunteer
    /// requests then answer with `500` until the process is restarted.
    ///
    /// # Errors
    /// Returns an error if the database settings are incomplete (e.g. a blank URL)
    /// or the state cannot be assembled.
    pub async fn build(self) -> Result<Server> {
        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);

        info!(address = %address, environment = %self.environment, "Initializing server");

        let db = self.database()?;

        info!(url = %db.url(), "Connecting to database");
        match db.connect().await {
            Ok(()) => info!("Connected to database"),
            Err(e) => error!(error = %e, "Database connection error"),
        }

        let slices = vhub::init(&db);

        let state = ApiState::builder()
            .config(self.cfg)
            .db(db)
            .environment(self.environment)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete application router, without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        if let Some(dir) = &cfg.server.static_dir
            && !dir.is_dir()
        {
            warn!(path = %dir.display(), "Static directory not found, web UI will not be served");
        }

        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
        });

        info!("Server running on http://{address}");

        axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Logger for this service as described by the `[logger]` config section.
pub fn logger(cfg: &LoggerConfig) -> LoggerBuilder {
    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).console(cfg.console);

    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter.as_str());
    }
    if let Some(path) = &cfg.path {
        let format = if cfg.json { LogFormat::Json } else { LogFormat::Text };
        builder = builder.file(path).format(format);
    }

    builder
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
