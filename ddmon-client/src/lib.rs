//! # ddmon-client
//!
//! Typed client for the Monitor API: create, update, fetch, list, delete,
//! mute and unmute monitors.
//!
//! Requests go through the [`Transport`] trait. The default `reqwest`
//! feature provides [`ReqwestTransport`], which talks to the real service;
//! tests and embedders can supply their own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ddmon_client::{Client, ReqwestTransport};
//! use ddmon_types::Monitor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::builder()
//!         .credentials("<api key>", "<application key>")
//!         .build()?;
//!     let client = Client::with_transport(transport);
//!
//!     let monitor = Monitor::builder()
//!         .monitor_type("metric alert")
//!         .query("avg(last_5m):avg:system.load.1{*} > 4")
//!         .name("High load")
//!         .build();
//!
//!     let created = client.create_monitor(&monitor).await?;
//!     println!("Created monitor {:?}", created.id);
//!
//!     let alerting = client
//!         .get_monitors_with_groups_by_tags(&["team:infra"], &[], &["Alert"], false)
//!         .await?;
//!     println!("{} monitors alerting", alerting.len());
//!     Ok(())
//! }
//! ```

mod client;
pub mod error;
mod monitors;
pub mod query;
pub mod transport;

pub use client::Client;
pub use error::{ClientError, Result};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport};

#[cfg(feature = "reqwest")]
pub use transport::{ReqwestTransport, ReqwestTransportBuilder, DEFAULT_BASE_URL};

// Re-export types for convenience
pub use ddmon_types::{Monitor, MuteMonitorScope, Options, UnmuteMonitorScopes};
