//! Decode helpers for fields the service sometimes sends as `null`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// A missing or `null` field decodes to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A `null` map decodes to an empty map, and each `null` value to
/// `V::default()`.
pub(crate) fn null_values_as_default<'de, D, V>(
    deserializer: D,
) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    let map = Option::<BTreeMap<String, Option<V>>>::deserialize(deserializer)?;
    Ok(fill_nulls(map.unwrap_or_default()))
}

/// Like [`null_values_as_default`], but a `null` map stays `None`.
pub(crate) fn optional_null_values_as_default<'de, D, V>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, V>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    let map = Option::<BTreeMap<String, Option<V>>>::deserialize(deserializer)?;
    Ok(map.map(fill_nulls))
}

fn fill_nulls<V: Default>(map: BTreeMap<String, Option<V>>) -> BTreeMap<String, V> {
    map.into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect()
}
