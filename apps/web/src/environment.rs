//! Client-side guess of the deployment environment.
//!
//! The browser only knows its own hostname, so this can disagree with the
//! server's report from `/api/environment`.

use vhub_domain::environment::Environment;

/// API origin used by development builds.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:3000";

/// Hostnames that always mean a development machine.
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];
const LOCAL_SUFFIX: &str = ".local";

/// Whether `hostname` (as reported by `window.location.hostname`) is a developer machine.
#[must_use]
pub fn is_development_host(hostname: &str) -> bool {
    LOOPBACK_HOSTS.contains(&hostname) || hostname.contains(LOCAL_SUFFIX)
}

/// Base URL the client sends API requests to.
///
/// Production uses `configured` when set and falls back to the page's own `origin`.
#[must_use]
pub fn api_base_url(environment: Environment, configured: Option<&str>, origin: &str) -> String {
    match environment {
        Environment::Development => DEVELOPMENT_API_URL.to_owned(),
        Environment::Production => configured
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(origin)
            .trim_end_matches('/')
            .to_owned(),
    }
}

/// Environment and API location resolved once when the app starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEnvironment {
    pub environment: Environment,
    pub api_url: String,
}

impl ClientEnvironment {
    #[must_use]
    pub fn from_location(hostname: &str, origin: &str, configured: Option<&str>) -> Self {
        let environment = Environment::from_local(is_development_host(hostname));
        Self { environment, api_url: api_base_url(environment, configured, origin) }
    }

    /// Resolves the environment from the current page location.
    #[must_use]
    pub fn detect() -> Self {
        let (hostname, origin) = location();
        Self::from_location(&hostname, &origin, option_env!("VHUB_API_URL"))
    }
}

#[cfg(target_arch = "wasm32")]
fn location() -> (String, String) {
    web_sys::window()
        .map(|window| window.location())
        .map(|location| {
            (location.hostname().unwrap_or_default(), location.origin().unwrap_or_default())
        })
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn location() -> (String, String) {
    ("localhost".to_owned(), DEVELOPMENT_API_URL.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_and_local_hosts_are_development() {
        for host in ["localhost", "127.0.0.1", "::1", "[::1]", "laptop.local", "svc.local.lan"] {
            assert!(is_development_host(host), "{host}");
        }
    }

    #[test]
    fn public_hosts_are_production() {
        for host in ["volunteers.example.org", "10.0.0.5", "127.0.0.2", ""] {
            assert!(!is_development_host(host), "{host}");
        }
    }

    #[test]
    fn development_always_targets_local_api() {
        let env = ClientEnvironment::from_location(
            "localhost",
            "http://localhost:8080",
            Some("https://api.example.org"),
        );
        assert_eq!(env.environment, Environment::Development);
        assert_eq!(env.api_url, DEVELOPMENT_API_URL);
    }

    #[test]
    fn production_prefers_configured_url() {
        let url = api_base_url(
            Environment::Production,
            Some("https://api.example.org/"),
            "https://app.example.org",
        );
        assert_eq!(url, "https://api.example.org");
    }

    #[test]
    fn production_falls_back_to_page_origin() {
        assert_eq!(
            api_base_url(Environment::Production, None, "https://app.example.org"),
            "https://app.example.org"
        );
        assert_eq!(
            api_base_url(Environment::Production, Some("  "), "https://app.example.org"),
            "https://app.example.org"
        );
    }
}
