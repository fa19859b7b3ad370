//! # ddmon-types
//!
//! Wire types for the Monitor API. This crate defines the JSON schema of a
//! monitor, its options and its server-computed state, along with the small
//! request bodies used to mute and unmute scopes.
//!
//! ## Optional Fields
//!
//! The service treats a missing field differently from a zero, `false` or
//! empty one, so every such field is an `Option`:
//!
//! - a key missing from the JSON (or set to `null`) decodes to `None`
//! - `None` is left out of the encoded object, never written as `null`
//! - `Some(0)`, `Some(false)` and `Some("")` are encoded as-is
//!
//! Two fields differ: `Monitor::tags` is always present (as `[]` when empty),
//! and `Options::no_data_timeframe` uses [`NoDataTimeframe`], which reads
//! `false` and `null` as zero.
//!
//! Threshold levels and other loosely typed numbers are [`Number`], backed by
//! serde_json's `arbitrary_precision` feature, so `90` and `90.0` both survive
//! a round trip unchanged.
//!
//! ## Example
//!
//! ```rust
//! use ddmon_types::Monitor;
//!
//! let monitor = Monitor::builder()
//!     .monitor_type("metric alert")
//!     .query("avg(last_5m):avg:system.cpu.user{role:db} > 90")
//!     .name("DB CPU")
//!     .tags(["role:db", "team:storage"])
//!     .options(|o| {
//!         o.notify_no_data(true)
//!             .no_data_timeframe(20)
//!             .thresholds(|t| t.critical(90).warning(80))
//!     })
//!     .build();
//!
//! let json = serde_json::to_string(&monitor).unwrap();
//! let parsed: Monitor = serde_json::from_str(&json).unwrap();
//! assert_eq!(monitor, parsed);
//! ```

mod monitor;
mod mute;
mod no_data;
mod nulls;
mod options;

pub use monitor::*;
pub use mute::*;
pub use no_data::*;
pub use options::*;

pub use serde_json::Number;
