//! Monitor endpoint operations.
//!
//! | Operation | Request |
//! |---|---|
//! | [`Client::create_monitor`] | `POST /v1/monitor` |
//! | [`Client::update_monitor`] | `PUT /v1/monitor/{id}` |
//! | [`Client::get_monitor`] | `GET /v1/monitor/{id}` |
//! | [`Client::get_monitors`] | `GET /v1/monitor` |
//! | [`Client::get_monitors_by_name`] | `GET /v1/monitor?name=...` |
//! | [`Client::get_monitors_by_tags`] | `GET /v1/monitor?monitor_tags=...` |
//! | [`Client::get_monitors_with_groups_by_tags`] | `GET /v1/monitor?...&with_downtimes=...` |
//! | [`Client::delete_monitor`] | `DELETE /v1/monitor/{id}` |
//! | [`Client::mute_monitors`] | `POST /v1/monitor/mute_all` |
//! | [`Client::unmute_monitors`] | `POST /v1/monitor/unmute_all` |
//! | [`Client::mute_monitor`], [`Client::mute_monitor_scope`] | `POST /v1/monitor/{id}/mute` |
//! | [`Client::unmute_monitor`], [`Client::unmute_monitor_scopes`] | `POST /v1/monitor/{id}/unmute` |

use ddmon_types::{Monitor, MuteMonitorScope, UnmuteMonitorScopes};

use crate::client::encode_body;
use crate::transport::HttpMethod;
use crate::{query, Client, ClientError, Result};

const MONITOR_PATH: &str = "/v1/monitor";

fn monitor_path(id: i64) -> String {
    format!("{}/{}", MONITOR_PATH, id)
}

fn list_path(query: &str) -> String {
    format!("{}?{}", MONITOR_PATH, query)
}

impl Client {
    /// Create a monitor. Returns the stored monitor, including its new id.
    pub async fn create_monitor(&self, monitor: &Monitor) -> Result<Monitor> {
        let body = encode_body(monitor)?;
        self.do_json_request(HttpMethod::Post, MONITOR_PATH.to_string(), Some(body))
            .await
    }

    /// Replace a monitor previously fetched or created.
    ///
    /// Fails with [`ClientError::MissingId`] without sending anything when
    /// `monitor.id` is unset.
    pub async fn update_monitor(&self, monitor: &Monitor) -> Result<()> {
        let id = monitor.id.ok_or(ClientError::MissingId)?;
        let body = encode_body(monitor)?;
        self.do_request(HttpMethod::Put, monitor_path(id), Some(body))
            .await
    }

    /// Fetch a monitor by id.
    pub async fn get_monitor(&self, id: i64) -> Result<Monitor> {
        self.do_json_request(HttpMethod::Get, monitor_path(id), None)
            .await
    }

    /// Fetch every monitor.
    pub async fn get_monitors(&self) -> Result<Vec<Monitor>> {
        self.do_json_request(HttpMethod::Get, MONITOR_PATH.to_string(), None)
            .await
    }

    /// Fetch monitors whose name matches `name`.
    pub async fn get_monitors_by_name(&self, name: &str) -> Result<Vec<Monitor>> {
        self.do_json_request(HttpMethod::Get, list_path(&query::by_name(name)), None)
            .await
    }

    /// Fetch monitors carrying all of `monitor_tags`.
    pub async fn get_monitors_by_tags(&self, monitor_tags: &[&str]) -> Result<Vec<Monitor>> {
        let query = query::by_monitor_tags(monitor_tags);
        self.do_json_request(HttpMethod::Get, list_path(&query), None)
            .await
    }

    /// Fetch monitors filtered by monitor tags, group (scope) tags and group
    /// states, optionally including their downtimes.
    pub async fn get_monitors_with_groups_by_tags(
        &self,
        monitor_tags: &[&str],
        tags: &[&str],
        group_states: &[&str],
        with_downtimes: bool,
    ) -> Result<Vec<Monitor>> {
        let query = query::with_groups_by_tags(monitor_tags, tags, group_states, with_downtimes);
        self.do_json_request(HttpMethod::Get, list_path(&query), None)
            .await
    }

    /// Delete a monitor.
    pub async fn delete_monitor(&self, id: i64) -> Result<()> {
        self.do_request(HttpMethod::Delete, monitor_path(id), None)
            .await
    }

    /// Mute notifications for every monitor.
    pub async fn mute_monitors(&self) -> Result<()> {
        self.do_request(HttpMethod::Post, format!("{}/mute_all", MONITOR_PATH), None)
            .await
    }

    /// Unmute notifications for every monitor.
    pub async fn unmute_monitors(&self) -> Result<()> {
        self.do_request(HttpMethod::Post, format!("{}/unmute_all", MONITOR_PATH), None)
            .await
    }

    /// Mute all notifications of one monitor.
    pub async fn mute_monitor(&self, id: i64) -> Result<()> {
        self.do_request(HttpMethod::Post, format!("{}/mute", monitor_path(id)), None)
            .await
    }

    /// Mute one scope of a monitor, optionally until a given time.
    pub async fn mute_monitor_scope(&self, id: i64, scope: &MuteMonitorScope) -> Result<()> {
        let body = encode_body(scope)?;
        self.do_request(
            HttpMethod::Post,
            format!("{}/mute", monitor_path(id)),
            Some(body),
        )
        .await
    }

    /// Unmute one monitor.
    pub async fn unmute_monitor(&self, id: i64) -> Result<()> {
        self.do_request(HttpMethod::Post, format!("{}/unmute", monitor_path(id)), None)
            .await
    }

    /// Unmute one scope, or all scopes, of a monitor.
    pub async fn unmute_monitor_scopes(
        &self,
        id: i64,
        scopes: &UnmuteMonitorScopes,
    ) -> Result<()> {
        let body = encode_body(scopes)?;
        self.do_request(
            HttpMethod::Post,
            format!("{}/unmute", monitor_path(id)),
            Some(body),
        )
        .await
    }
}
