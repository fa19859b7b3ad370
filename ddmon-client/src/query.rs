//! Query strings for the monitor list endpoint.
//!
//! List filters are comma-joined and percent-encoded as one token, so a comma
//! inside a single tag is indistinguishable from a separator. The service
//! parses it the same way.

/// `name=<name>`
pub fn by_name(name: &str) -> String {
    format!("name={}", urlencoding::encode(name))
}

/// `monitor_tags=<tags>`. The key is sent even when `monitor_tags` is empty.
pub fn by_monitor_tags(monitor_tags: &[&str]) -> String {
    format!("monitor_tags={}", encode_list(monitor_tags))
}

/// Combined filter: `monitor_tags`, `tags` and `group_states` in that order,
/// each only when non-empty, followed by `with_downtimes`, which is always
/// present.
///
/// # Example
///
/// ```rust
/// use ddmon_client::query;
///
/// let q = query::with_groups_by_tags(&["a", "b"], &[], &["Alert"], true);
/// assert_eq!(q, "monitor_tags=a%2Cb&group_states=Alert&with_downtimes=true");
///
/// let q = query::with_groups_by_tags(&[], &[], &[], false);
/// assert_eq!(q, "with_downtimes=false");
/// ```
pub fn with_groups_by_tags(
    monitor_tags: &[&str],
    tags: &[&str],
    group_states: &[&str],
    with_downtimes: bool,
) -> String {
    let mut pairs = Vec::with_capacity(4);

    for (key, values) in [
        ("monitor_tags", monitor_tags),
        ("tags", tags),
        ("group_states", group_states),
    ] {
        if !values.is_empty() {
            pairs.push(format!("{}={}", key, encode_list(values)));
        }
    }
    pairs.push(format!("with_downtimes={}", with_downtimes));

    pairs.join("&")
}

fn encode_list(values: &[&str]) -> String {
    urlencoding::encode(&values.join(",")).into_owned()
}
