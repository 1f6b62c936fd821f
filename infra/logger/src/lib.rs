//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the volunteer services:
//! a compact console layer and, when a directory is given, a rolling log file
//! written by a background worker as plain text or JSON lines.
//!
//! `RUST_LOG` refines the default level unless explicit directives are set
//! with [`LoggerBuilder::env_filter`].
//!
//! ## Example
//!
//! ```rust
//! # use vhub_logger::{LogFormat, Logger};
//! let dir = std::env::temp_dir().join("vhub-doc-logs");
//!
//! let _logger = Logger::builder()
//!     .name("vhub-server")
//!     .file(&dir)
//!     .format(LogFormat::Json)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Line format of the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Rolling file destination.
#[derive(Debug, Clone)]
struct FileOutput {
    dir: PathBuf,
    format: LogFormat,
    rotation: Rotation,
    max_files: usize,
}

/// Collects the subscriber settings; [`LoggerBuilder::init`] installs them.
#[must_use = "a logger builder does nothing until `.init()` is called"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    file: Option<FileOutput>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            file: None,
        }
    }
}

impl LoggerBuilder {
    /// Service name; also the prefix of rolled log files.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Filter directives such as `vhub=debug,hyper=warn`, used instead of `RUST_LOG`.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Also writes events to daily-rolled files under `dir`.
    pub fn file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            dir: dir.into(),
            format: LogFormat::Text,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        });
        self
    }

    /// Line format of the file output. No effect without [`LoggerBuilder::file`].
    pub fn format(mut self, format: LogFormat) -> Self {
        if let Some(file) = &mut self.file {
            file.format = format;
        }
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = &mut self.file {
            file.rotation = rotation;
        }
        self
    }

    /// Number of rolled files kept on disk.
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = &mut self.file {
            file.max_files = max;
        }
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it stops the
    /// file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, zero retained files,
    ///   unparsable directives, or when neither console nor file output is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if this process already has a global subscriber.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.filter()?;

        let mut layers: Vec<BoxedLayer<_>> = Vec::new();
        if self.console {
            layers.push(fmt::layer().compact().boxed());
        }

        let guard = match &self.file {
            Some(output) => {
                let (layer, guard) = file_layer(&self.name, output)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let problem = if self.name.trim().is_empty() {
            Some("Logger name cannot be empty")
        } else if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            Some("max_files must be greater than zero")
        } else if !self.console && self.file.is_none() {
            Some("Neither console nor file output is enabled")
        } else {
            None
        };

        problem.map_or(Ok(()), |message| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            },
        }
    }
}

fn file_layer<S>(
    name: &str,
    output: &FileOutput,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(&output.dir)
        .context(format!("Failed to create path: {}", output.dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(output.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(output.max_files)
        .build(&output.dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = match output.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    };

    Ok((layer, guard))
}

/// Handle to the installed subscriber; owns the file writer when one is active.
#[must_use = "dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Whether events are also written to a log file.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Flushing log files");
        }
    }
}
