//! Endpoint Resolution
//!
//! Picks the websocket URL the dashboard connects to. Kept apart from the
//! view, which only ever sees the resulting string.

/// Path of the national stats stream
pub const NATIONAL_PATH: &str = "/national";

/// Endpoint used when nothing else is configured
pub const DEV_DEFAULT_URL: &str = "ws://localhost:8080/national";

/// Environment variables consulted for an explicit endpoint, in priority order
pub const URL_ENV_VARS: [&str; 2] = ["RAILSTATS_WEBSOCKET_URL", "VITE_WEBSOCKET_URL"];

/// Endpoint-related view of the process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Explicit websocket URL override
    pub websocket_url: Option<String>,
}

impl Environment {
    /// Read the override from the process environment. Empty values count
    /// as unset.
    pub fn from_process() -> Self {
        let websocket_url = URL_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());

        Self { websocket_url }
    }
}

/// Host the dashboard is being served for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Host and optional port, e.g. `rail.example.com:8443`
    pub host: String,
    /// Whether the originating request was over TLS
    pub secure: bool,
}

impl RequestContext {
    pub fn new(host: impl Into<String>, secure: bool) -> Self {
        Self {
            host: host.into(),
            secure,
        }
    }
}

/// Resolve the websocket URL.
///
/// An explicit override wins, then a URL derived from the request host,
/// then the development default.
pub fn resolve(env: &Environment, request: Option<&RequestContext>) -> String {
    if let Some(url) = &env.websocket_url {
        return url.clone();
    }

    match request {
        Some(ctx) => {
            let scheme = if ctx.secure { "wss" } else { "ws" };
            format!("{}://{}{}", scheme, ctx.host.trim_end_matches('/'), NATIONAL_PATH)
        }
        None => DEV_DEFAULT_URL.to_string(),
    }
}
