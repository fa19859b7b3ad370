//! Monitor - the root entity of the Monitor API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::nulls::{null_as_default, null_values_as_default};
use crate::{Options, OptionsBuilder};

/// A monitor watches a metric, check or log query and notifies when a
/// threshold is crossed.
///
/// Fields the service may leave out are `Option`s and are skipped when
/// encoding. `tags` is the exception: it is always encoded, as `[]` when
/// empty, and decodes to an empty list when the key is missing or `null`.
///
/// # Example
///
/// ```rust
/// use ddmon_types::Monitor;
///
/// let monitor = Monitor::builder()
///     .monitor_type("metric alert")
///     .query("avg(last_5m):avg:system.load.1{*} > 4")
///     .name("High load")
///     .message("Load is high @ops")
///     .tag("team:infra")
///     .options(|o| o.notify_no_data(true).thresholds(|t| t.critical(4)))
///     .build();
///
/// assert!(!monitor.is_created());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Monitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,

    /// Server-assigned identifier. Unset until the monitor is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Monitor type, e.g. `metric alert`, `service check` or `log alert`.
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub monitor_type: Option<String>,

    /// The alerting expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Notification body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_state_modified: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,

    /// Per-group state computed by the service. Read-only.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "State::is_empty"
    )]
    pub state: State,
}

impl Monitor {
    /// Create a builder for constructing monitors.
    pub fn builder() -> MonitorBuilder {
        MonitorBuilder::new()
    }

    /// Whether the service has assigned this monitor an id.
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }

    /// Check whether the monitor carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Author of a monitor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Evaluation state of a monitor, keyed by group name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    /// A `null` group decodes as an empty `GroupData`.
    #[serde(
        default,
        deserialize_with = "null_values_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub groups: BTreeMap<String, GroupData>,
}

impl State {
    /// Check if no group has been evaluated.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get the state of a single group.
    pub fn group(&self, name: &str) -> Option<&GroupData> {
        self.groups.get(name)
    }

    /// Iterate over groups whose status equals `status` (e.g. `Alert`).
    pub fn groups_in(&self, status: &str) -> impl Iterator<Item = (&String, &GroupData)> {
        let status = status.to_string();
        self.groups
            .iter()
            .filter(move |(_, g)| g.status.as_deref() == Some(status.as_str()))
    }
}

/// State of one evaluated group of a multi-alert monitor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_nodata_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_notified_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_resolved_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current status, e.g. `OK`, `Alert`, `Warn`, `No Data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggering_value: Option<TriggeringValue>,
}

/// The value that caused the last trigger, and the window it was seen in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggeringValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for `Monitor`.
#[derive(Debug, Default)]
pub struct MonitorBuilder {
    monitor: Monitor,
}

impl MonitorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id, for monitors that already exist on the service.
    pub fn id(mut self, id: i64) -> Self {
        self.monitor.id = Some(id);
        self
    }

    pub fn monitor_type(mut self, monitor_type: impl Into<String>) -> Self {
        self.monitor.monitor_type = Some(monitor_type.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.monitor.query = Some(query.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.monitor.name = Some(name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.monitor.message = Some(message.into());
        self
    }

    /// Append a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.monitor.tags.push(tag.into());
        self
    }

    /// Replace all tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.monitor.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set options built using a closure.
    pub fn options<F>(mut self, f: F) -> Self
    where
        F: FnOnce(OptionsBuilder) -> OptionsBuilder,
    {
        self.monitor.options = Some(f(OptionsBuilder::new()).build());
        self
    }

    /// Build the monitor.
    pub fn build(self) -> Monitor {
        self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoDataTimeframe, SILENCED_INDEFINITELY};
    use serde_json::json;

    fn roundtrip(monitor: &Monitor) -> Monitor {
        let json = serde_json::to_string(monitor).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn empty_monitor_encodes_only_tags() {
        let json = serde_json::to_string(&Monitor::default()).unwrap();
        assert_eq!(json, r#"{"tags":[]}"#);
    }

    #[test]
    fn missing_tags_decode_to_empty() {
        let monitor: Monitor = serde_json::from_str(r#"{"name": "cpu"}"#).unwrap();
        assert!(monitor.tags.is_empty());
        assert_eq!(monitor.name.as_deref(), Some("cpu"));

        let monitor: Monitor = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(monitor.tags.is_empty());
    }

    #[test]
    fn tags_keep_order() {
        let monitor: Monitor =
            serde_json::from_str(r#"{"tags": ["b:2", "a:1", "c:3"]}"#).unwrap();
        assert_eq!(monitor.tags, vec!["b:2", "a:1", "c:3"]);
        assert!(monitor.has_tag("a:1"));
        assert!(!monitor.has_tag("a"));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let monitor: Monitor = serde_json::from_str(r#"{"id": 0, "message": ""}"#).unwrap();
        assert_eq!(monitor.id, Some(0));
        assert_eq!(monitor.message.as_deref(), Some(""));
        assert_eq!(monitor.query, None);
        assert_eq!(monitor.options, None);
        assert_eq!(monitor.creator, None);

        let value = serde_json::to_value(&monitor).unwrap();
        assert_eq!(value, json!({"id": 0, "message": "", "tags": []}));
    }

    #[test]
    fn type_field_is_renamed() {
        let monitor = Monitor::builder().monitor_type("metric alert").build();
        let value = serde_json::to_value(&monitor).unwrap();
        assert_eq!(value["type"], "metric alert");
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(serde_json::from_str::<Monitor>(r#"{"id": "12"}"#).is_err());
        assert!(serde_json::from_str::<Monitor>(r#"{"tags": "a,b"}"#).is_err());
        assert!(
            serde_json::from_str::<Monitor>(r#"{"options": {"no_data_timeframe": "x"}}"#).is_err()
        );
    }

    #[test]
    fn roundtrip_sparse_subsets() {
        let monitors = vec![
            Monitor::builder().name("only name").build(),
            Monitor::builder().id(7).tag("env:prod").build(),
            Monitor::builder()
                .query("avg(last_1h):avg:aws.ec2.cpu{*} > 90")
                .options(|o| o.locked(false))
                .build(),
            Monitor::builder()
                .options(|o| {
                    o.no_data_timeframe(30)
                        .silence_indefinitely("*")
                        .thresholds(|t| t.critical(90).warning_recovery(70))
                })
                .build(),
            Monitor {
                creator: Some(Creator {
                    handle: Some("ops@example.com".to_string()),
                    ..Default::default()
                }),
                overall_state: Some("OK".to_string()),
                ..Default::default()
            },
        ];

        for monitor in &monitors {
            assert_eq!(&roundtrip(monitor), monitor);
        }
    }

    #[test]
    fn decode_full_response() {
        let body = json!({
            "id": 91879,
            "type": "metric alert",
            "query": "avg(last_5m):sum:system.net.bytes_rcvd{host:host0} > 100",
            "name": "Bytes received on host0",
            "message": "We may need to add web hosts if this is consistently high.",
            "overall_state": "Alert",
            "overall_state_modified": "2020-01-01T00:00:00+00:00",
            "tags": ["app:webserver", "frontend"],
            "creator": {
                "email": "matt@example.com",
                "handle": "matt@example.com",
                "id": 1896,
                "name": "Matt"
            },
            "options": {
                "no_data_timeframe": false,
                "notify_audit": false,
                "notify_no_data": false,
                "renotify_interval": null,
                "silenced": {"*": -1},
                "thresholds": {"critical": 100, "warning": 80.5}
            },
            "state": {
                "groups": {
                    "host:host0": {
                        "last_nodata_ts": null,
                        "last_notified_ts": 1481909160,
                        "last_resolved_ts": 1481908200,
                        "last_triggered_ts": 1481909160,
                        "name": "host:host0",
                        "status": "Alert",
                        "triggering_value": {
                            "from_ts": 1481909037,
                            "to_ts": 1481909097,
                            "value": 1000.25
                        }
                    }
                }
            }
        });

        let monitor: Monitor = serde_json::from_value(body).unwrap();
        assert_eq!(monitor.id, Some(91879));
        assert_eq!(monitor.creator.as_ref().unwrap().id, Some(1896));

        let options = monitor.options.as_ref().unwrap();
        assert_eq!(options.no_data_timeframe, NoDataTimeframe::DISABLED);
        assert_eq!(options.notify_audit, Some(false));
        assert_eq!(options.renotify_interval, None);
        assert_eq!(options.silenced_until("*"), Some(SILENCED_INDEFINITELY));

        let group = monitor.state.group("host:host0").unwrap();
        assert_eq!(group.last_nodata_ts, None);
        assert_eq!(group.status.as_deref(), Some("Alert"));
        let value = group.triggering_value.as_ref().unwrap();
        assert_eq!(value.value.as_ref().unwrap().to_string(), "1000.25");
        assert_eq!(monitor.state.groups_in("Alert").count(), 1);
        assert_eq!(monitor.state.groups_in("OK").count(), 0);
    }

    #[test]
    fn null_map_values_decode() {
        let monitor: Monitor = serde_json::from_str(
            r#"{"options": {"silenced": {"*": null}}, "state": {"groups": {"g": null}}}"#,
        )
        .unwrap();

        let options = monitor.options.as_ref().unwrap();
        assert!(options.is_silenced("*"));
        assert_eq!(options.silenced_until("*"), Some(0));
        assert_eq!(monitor.state.group("g"), Some(&GroupData::default()));
    }

    #[test]
    fn list_with_one_muted_monitor_decodes() {
        let body = r#"[{"id":1},{"id":2,"options":{"silenced":{"host:a":null}}}]"#;
        let monitors: Vec<Monitor> = serde_json::from_str(body).unwrap();

        assert_eq!(monitors.len(), 2);
        assert!(monitors[0].options.is_none());
        let options = monitors[1].options.as_ref().unwrap();
        assert_eq!(options.silenced_until("host:a"), Some(0));
    }

    #[test]
    fn null_state_is_empty() {
        let monitor: Monitor = serde_json::from_str(r#"{"state": null}"#).unwrap();
        assert!(monitor.state.is_empty());

        let monitor: Monitor = serde_json::from_str(r#"{"state": {}}"#).unwrap();
        assert!(monitor.state.is_empty());
    }

    #[test]
    fn state_roundtrip() {
        let mut monitor = Monitor::default();
        monitor.state.groups.insert(
            "host:a".to_string(),
            GroupData {
                status: Some("OK".to_string()),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&monitor).unwrap();
        assert_eq!(
            value,
            json!({"tags": [], "state": {"groups": {"host:a": {"status": "OK"}}}})
        );
        assert_eq!(roundtrip(&monitor), monitor);
    }
}
