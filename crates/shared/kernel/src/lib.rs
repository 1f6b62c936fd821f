//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, host environment checks,
//! and (with the `server` feature) the state, errors, and system routes every
//! HTTP slice builds on.
//!
//! ## Config loading
//! ```rust,no_run
//! use vhub_kernel::config::load_config;
//! use vhub_kernel::domain::config::ApiConfig;
//! use vhub_kernel::environment;
//!
//! let cfg: ApiConfig = load_config("config", environment::detect()).unwrap();
//! ```
pub mod config;
pub mod environment;
#[cfg(feature = "server")]
pub mod server;

pub use vhub_domain as domain;
