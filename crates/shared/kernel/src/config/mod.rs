use config::{Case, Config, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;
use vhub_domain::environment::Environment;

/// Prefix of environment variables that override file settings (`VHUB__SERVER__PORT`).
pub const ENV_PREFIX: &str = "VHUB";
/// Separator between nesting levels in environment variable names.
pub const ENV_SEPARATOR: &str = "__";
/// Plain variable for the listening port.
pub const PORT_VAR: &str = "PORT";
/// Plain variable for the database connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to results from the `config` crate.
pub trait ConfigErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Loads configuration for the given runtime environment.
///
/// Layers, lowest precedence first:
/// 1. **Defaults** of `T` (via `#[serde(default)]`).
/// 2. **Environment File**: `<dir>/<environment>` with any supported extension
///    (e.g., `config/development.toml`). Missing files are skipped.
/// 3. **Prefixed Variables**: `VHUB__`-prefixed variables, nested with `__`
///    (e.g., `VHUB__DATABASE__URL` maps to `database.url`).
/// 4. **Plain Variables**: `PORT` and `DATABASE_URL`.
///
/// # Errors
/// Returns an error if a file or variable is malformed or does not match `T`.
///
/// # Example
/// ```rust
/// use vhub_kernel::config::load_config;
/// use vhub_kernel::domain::environment::Environment;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config("config", Environment::Development).unwrap_or_default();
/// ```
pub fn load_config<T>(dir: impl AsRef<Path>, environment: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    ConfigLoader::new(dir, environment).load()
}

/// Configurable form of [`load_config`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    environment: Environment,
    vars: Option<Map<String, String>>,
}

impl ConfigLoader {
    pub fn new(dir: impl AsRef<Path>, environment: Environment) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), environment, vars: None }
    }

    /// Reads variables from `vars` instead of the process environment.
    #[must_use]
    pub fn vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// The environment file location, without extension.
    #[must_use]
    pub fn file_stem(&self) -> PathBuf {
        self.dir.join(self.environment.as_str())
    }

    /// Builds and deserializes the layered configuration.
    ///
    /// # Errors
    /// See [`load_config`].
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let stem = self.file_stem();
        let vars = self.vars.clone().unwrap_or_else(|| std::env::vars().collect());

        let port = vars
            .get(PORT_VAR)
            .map(|raw| {
                raw.trim().parse::<i64>().map_err(|e| {
                    config::ConfigError::Message(format!("{PORT_VAR} must be a number: {e}"))
                })
            })
            .transpose()
            .context("Reading PORT")?;
        let database_url = vars.get(DATABASE_URL_VAR).cloned();

        info!(environment = %self.environment, file = %stem.display(), "Loading config");

        Config::builder()
            .add_source(File::with_name(&stem.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .convert_case(Case::Snake)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("server.port", port)
            .context("Applying PORT")?
            .set_override_option("database.url", database_url)
            .context("Applying DATABASE_URL")?
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}
