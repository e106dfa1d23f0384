use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Careloop";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend origin used when `CARELOOP_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4353";

/// Listen address used when `CARELOOP_BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4380";

/// Development-only token secret used when `CARELOOP_SESSION_SECRET` is not
/// set. Deployments must override it; the session tier warns on startup when
/// this value is in use.
pub const DEV_SESSION_SECRET: &str = "your_secret_key";

/// Per-request timeout for calls to the care backend.
pub const BACKEND_TIMEOUT_SECS: u64 = 10;

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,careloop_lib=debug".to_string()
}

/// Runtime settings resolved from the environment.
///
/// Priority per field:
/// 1. `CARELOOP_*` env var (explicit override)
/// 2. Compiled default (local development values)
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Address the portal listens on.
    pub bind_addr: SocketAddr,
    /// Base URL of the care backend (no trailing slash).
    pub backend_url: String,
    /// HS256 secret for verifying session tokens.
    pub session_secret: String,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("CARELOOP_BIND_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                DEFAULT_BIND_ADDR
                    .parse()
                    .unwrap_or(SocketAddr::from(([127, 0, 0, 1], 4380)))
            });

        let backend_url = std::env::var("CARELOOP_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let session_secret = std::env::var("CARELOOP_SESSION_SECRET")
            .unwrap_or_else(|_| DEV_SESSION_SECRET.to_string());

        Self {
            bind_addr,
            backend_url: backend_url.trim_end_matches('/').to_string(),
            session_secret,
        }
    }

    /// Is the compiled development secret still in use?
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4380)),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            session_secret: DEV_SESSION_SECRET.to_string(),
        }
    }
}
