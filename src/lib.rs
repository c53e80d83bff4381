//! # Railstats
//!
//! Live terminal dashboard of national rail punctuality statistics,
//! streamed over a websocket.
//!
//! ## Modules
//!
//! - [`stats`]: Snapshot and status types, defensive payload decoding
//! - [`view`]: Realtime connection view, state transitions and rendering
//! - [`transport`]: WebSocket connector built on `tokio-tungstenite`
//! - [`dashboard`]: Event loop that applies events and redraws frames
//! - [`endpoint`]: Websocket URL resolution
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use railstats::dashboard::Dashboard;
//! use railstats::transport::WsConnector;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut dashboard = Dashboard::new(WsConnector, std::io::stdout());
//!     dashboard
//!         .run("ws://localhost:8080/national", async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod logging;
pub mod stats;
pub mod transport;
pub mod view;

// Re-export top-level types for convenience
pub use config::Config;
pub use dashboard::Dashboard;
pub use stats::{ConnectionStatus, StatsSnapshot};
pub use view::{RealtimeView, ViewState};
