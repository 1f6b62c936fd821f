//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing and managing [SurrealDB](https://surrealdb.com)
//! connections across the workspace.
//!
//! ## Key Features
//! - **Engine Agnostic**: Supports `mem://`, `rocksdb://`, `ws://`, and `http://` via the `any` engine.
//! - **Deferred Connection**: A [`Database`] handle can exist before (or without) a live connection;
//!   queries on an unconnected handle fail instead of aborting the process.
//! - **Schema Bootstrap**: Feature slices hand their `DEFINE` scripts to the builder, which applies
//!   them right after the session is activated.
//!
//! ## Example
//!
//! ```rust
//! use vhub_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("vhub", "volunteers")
//!         .schema("DEFINE TABLE IF NOT EXISTS volunteer SCHEMALESS;")
//!         .init()
//!         .await?;
//!
//!     let _version = db.version().await?;
//!
//!     Ok(())
//! }
//! ```

mod error;

pub use error::{DatabaseError, DatabaseErrorExt};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use tracing::{debug, info, instrument};

/// Root credentials used to sign in after connecting.
#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    url: String,
    ns: String,
    db: String,
    credentials: Option<Credentials>,
    schema: Vec<&'static str>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        debug!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// `SurrealDB` client wrapper that is cheap to clone and share between requests.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// The connection URL this handle targets.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Establishes the connection and prepares the session.
    ///
    /// # Process
    /// 1. **Engine Initialization**: Connects the underlying `any` engine to the configured URL.
    /// 2. **Health Check**: Verifies the engine answers. There is no retry; a failing store is
    ///    reported to the caller once.
    /// 3. **Authentication**: Signs in as root if credentials were given via [`DatabaseBuilder::auth`].
    /// 4. **Session Activation**: Selects the namespace and database.
    /// 5. **Schema**: Applies every script registered via [`DatabaseBuilder::schema`], in order.
    ///
    /// # Errors
    /// * [`DatabaseError::Connection`] if the engine cannot be reached or is unhealthy.
    /// * [`DatabaseError::Auth`] if the credentials are rejected.
    /// * [`DatabaseError::Surreal`] if the session activation (`use_ns`/`use_db`) fails.
    /// * [`DatabaseError::Schema`] if a schema script fails.
    #[instrument(skip(self), fields(url = %self.inner.url, ns = %self.inner.ns, db = %self.inner.db))]
    pub async fn connect(&self) -> Result<(), DatabaseError> {
        let inner = &self.inner;

        inner.instance.connect(inner.url.as_str()).await.map_err(|e| {
            DatabaseError::Connection {
                message: e.to_string().into(),
                context: Some("Initializing engine".into()),
            }
        })?;

        inner.instance.health().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Health check".into()),
        })?;

        if let Some(creds) = &inner.credentials {
            inner
                .instance
                .signin(Root { username: creds.username.clone(), password: creds.password.clone() })
                .await
                .map_err(|e| DatabaseError::Auth {
                    message: e.to_string().into(),
                    context: Some(inner.url.clone().into()),
                })?;
        }

        inner.instance.use_ns(&inner.ns).use_db(&inner.db).await.context("Activating session")?;

        let version =
            inner.instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %inner.ns, database = %inner.db, %version, "SurrealDB connection established");

        self.apply_schema().await
    }

    async fn apply_schema(&self) -> Result<(), DatabaseError> {
        for (index, script) in self.inner.schema.iter().enumerate() {
            self.inner
                .instance
                .query(*script)
                .await
                .and_then(|response| response.check().map_err(surrealdb::Error::from))
                .map_err(|e| DatabaseError::Schema {
                    message: e.to_string().into(),
                    context: Some(format!("Schema script #{index}").into()),
                })?;
        }

        if !self.inner.schema.is_empty() {
            info!(scripts = self.inner.schema.len(), "Database schema applied");
        }
        Ok(())
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// A fluent builder for configuring a `SurrealDB` handle.
///
/// The URL, namespace, and database name must be provided; credentials and
/// schema scripts are optional.
#[must_use = "builders do nothing unless you call .build() or .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    credentials: Option<Credentials>,
    schema: Vec<&'static str>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the namespace and database name.
    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Adds root credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials { username: username.into(), password: password.into() });
        self
    }

    /// Registers a schema script applied after every successful [`Database::connect`].
    ///
    /// Scripts should be idempotent (`DEFINE ... IF NOT EXISTS`).
    pub fn schema(mut self, script: &'static str) -> Self {
        self.schema.push(script);
        self
    }

    /// Registers several schema scripts at once.
    pub fn schemas<I>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.schema.extend(scripts);
        self
    }

    /// Validates the parameters and returns an unconnected handle.
    ///
    /// Queries issued before [`Database::connect`] succeeds return an error.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if the URL, namespace, or database is missing.
    pub fn build(self) -> Result<Database, DatabaseError> {
        let url = self.url.filter(|u| !u.trim().is_empty()).ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let ns = self.ns.ok_or(DatabaseError::Validation {
            message: "Namespace is required".into(),
            context: None,
        })?;
        let db = self.db.ok_or(DatabaseError::Validation {
            message: "Database is required".into(),
            context: None,
        })?;

        Ok(Database {
            inner: Arc::new(DatabaseInner {
                instance: Surreal::init(),
                url,
                ns,
                db,
                credentials: self.credentials,
                schema: self.schema,
            }),
        })
    }

    /// Builds the handle and connects it.
    ///
    /// # Errors
    /// Any error from [`DatabaseBuilder::build`] or [`Database::connect`].
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let database = self.build()?;
        database.connect().await?;
        Ok(database)
    }
}
