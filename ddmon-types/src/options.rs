//! Monitor options: notification toggles, thresholds and log query settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::nulls::optional_null_values_as_default;
use crate::NoDataTimeframe;

/// Silence value meaning "until manually unsilenced".
pub const SILENCED_INDEFINITELY: i64 = -1;

/// Behavior toggles attached to a monitor.
///
/// Every field is optional on the wire. Unset fields are left out of the
/// encoded object so the service keeps its own defaults for them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Options {
    /// Minutes without data before notifying. Zero is disabled and omitted.
    #[serde(default, skip_serializing_if = "NoDataTimeframe::is_disabled")]
    pub no_data_timeframe: NoDataTimeframe,

    /// Notify tagged users when the monitor is changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_audit: Option<bool>,

    /// Notify when data stops arriving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_no_data: Option<bool>,

    /// Minutes after the last notification before re-notifying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renotify_interval: Option<i64>,

    /// Seconds to wait before evaluating a newly reporting host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_host_delay: Option<i64>,

    /// Seconds to delay evaluation by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_delay: Option<i64>,

    /// Silenced scopes, mapped to the unix time the silence ends
    /// or [`SILENCED_INDEFINITELY`]. A `null` end decodes as 0.
    #[serde(
        default,
        deserialize_with = "optional_null_values_as_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub silenced: Option<BTreeMap<String, i64>>,

    /// Hours after which a triggered monitor resolves on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_h: Option<i64>,

    /// Message included with re-notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdCount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_windows: Option<ThresholdWindows>,

    /// Include the triggering tags in the notification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<bool>,

    /// Only evaluate once a full window of data is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_full_window: Option<bool>,

    /// Restrict edits to the creator and administrators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    /// Attach sample log lines to log monitor notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_logs_sample: Option<bool>,

    /// Log search backing a log monitor.
    #[serde(
        default,
        rename = "queryConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub query_config: Option<QueryConfig>,
}

impl Options {
    /// Create a builder for options.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Check whether `scope` has an entry in the silenced map.
    pub fn is_silenced(&self, scope: &str) -> bool {
        self.silenced
            .as_ref()
            .map_or(false, |s| s.contains_key(scope))
    }

    /// Silence end for `scope`, if it is silenced.
    pub fn silenced_until(&self, scope: &str) -> Option<i64> {
        self.silenced.as_ref().and_then(|s| s.get(scope).copied())
    }
}

/// Trigger and recovery levels per alert state.
///
/// Levels are kept as [`Number`] because the service sends integers for some
/// monitor types and decimals for others, and both must survive a round trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_recovery: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_recovery: Option<Number>,

    /// Averaging period for check and service monitors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(
        default,
        rename = "timeAggregator",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_aggregator: Option<String>,
}

/// Windows in the service's duration grammar (e.g. `last_15m`).
///
/// The strings are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThresholdWindows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_window: Option<String>,
}

/// An evaluation window, either in seconds or as a labelled choice.
///
/// The fields are alternatives; the service rarely populates all of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Search behind a log monitor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default, rename = "logset", skip_serializing_if = "Option::is_none")]
    pub log_set: Option<LogSet>,

    #[serde(
        default,
        rename = "timeRange",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_range: Option<TimeRange>,

    #[serde(
        default,
        rename = "queryString",
        skip_serializing_if = "Option::is_none"
    )]
    pub query_string: Option<String>,

    #[serde(
        default,
        rename = "queryIsFailed",
        skip_serializing_if = "Option::is_none"
    )]
    pub query_is_failed: Option<bool>,
}

/// The log index a log monitor searches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Time range of a log search: absolute bounds, or live.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for `Options`.
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the no-data timeframe in minutes.
    pub fn no_data_timeframe(mut self, minutes: i32) -> Self {
        self.options.no_data_timeframe = NoDataTimeframe(minutes);
        self
    }

    pub fn notify_audit(mut self, notify: bool) -> Self {
        self.options.notify_audit = Some(notify);
        self
    }

    pub fn notify_no_data(mut self, notify: bool) -> Self {
        self.options.notify_no_data = Some(notify);
        self
    }

    /// Set the renotify interval in minutes.
    pub fn renotify_interval(mut self, minutes: i64) -> Self {
        self.options.renotify_interval = Some(minutes);
        self
    }

    pub fn new_host_delay(mut self, secs: i64) -> Self {
        self.options.new_host_delay = Some(secs);
        self
    }

    pub fn evaluation_delay(mut self, secs: i64) -> Self {
        self.options.evaluation_delay = Some(secs);
        self
    }

    /// Silence `scope` until the unix time `end`.
    pub fn silence(mut self, scope: impl Into<String>, end: i64) -> Self {
        self.options
            .silenced
            .get_or_insert_with(BTreeMap::new)
            .insert(scope.into(), end);
        self
    }

    /// Silence `scope` until it is unsilenced by hand.
    pub fn silence_indefinitely(self, scope: impl Into<String>) -> Self {
        self.silence(scope, SILENCED_INDEFINITELY)
    }

    pub fn timeout_h(mut self, hours: i64) -> Self {
        self.options.timeout_h = Some(hours);
        self
    }

    pub fn escalation_message(mut self, message: impl Into<String>) -> Self {
        self.options.escalation_message = Some(message.into());
        self
    }

    /// Set thresholds built using a closure.
    pub fn thresholds<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ThresholdCount) -> ThresholdCount,
    {
        self.options.thresholds = Some(f(ThresholdCount::default()));
        self
    }

    pub fn threshold_windows(
        mut self,
        recovery_window: impl Into<String>,
        trigger_window: impl Into<String>,
    ) -> Self {
        self.options.threshold_windows = Some(ThresholdWindows {
            recovery_window: Some(recovery_window.into()),
            trigger_window: Some(trigger_window.into()),
        });
        self
    }

    pub fn include_tags(mut self, include: bool) -> Self {
        self.options.include_tags = Some(include);
        self
    }

    pub fn require_full_window(mut self, require: bool) -> Self {
        self.options.require_full_window = Some(require);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.options.locked = Some(locked);
        self
    }

    pub fn enable_logs_sample(mut self, enable: bool) -> Self {
        self.options.enable_logs_sample = Some(enable);
        self
    }

    pub fn query_config(mut self, config: QueryConfig) -> Self {
        self.options.query_config = Some(config);
        self
    }

    /// Build the options.
    pub fn build(self) -> Options {
        self.options
    }
}

impl ThresholdCount {
    /// Set the critical level.
    pub fn critical(mut self, level: impl Into<Number>) -> Self {
        self.critical = Some(level.into());
        self
    }

    /// Set the warning level.
    pub fn warning(mut self, level: impl Into<Number>) -> Self {
        self.warning = Some(level.into());
        self
    }

    /// Set the ok level (service checks).
    pub fn ok(mut self, level: impl Into<Number>) -> Self {
        self.ok = Some(level.into());
        self
    }

    pub fn critical_recovery(mut self, level: impl Into<Number>) -> Self {
        self.critical_recovery = Some(level.into());
        self
    }

    pub fn warning_recovery(mut self, level: impl Into<Number>) -> Self {
        self.warning_recovery = Some(level.into());
        self
    }
}
