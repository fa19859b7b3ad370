//! No-data timeframe, the one integer field the API also sends as `false`.
//!
//! The service reports a disabled no-data check as `false` or `null` rather
//! than `0`, so this type carries its own decode rule instead of relying on a
//! plain integer.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Minutes of missing data after which a monitor reports "no data".
///
/// Zero means the check is disabled. Decoding accepts a base-10 integer that
/// fits in an `i32`, and maps the literals `false` and `null` to zero. Every
/// other token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NoDataTimeframe(pub i32);

impl NoDataTimeframe {
    /// The disabled timeframe.
    pub const DISABLED: Self = Self(0);

    /// Create a timeframe of `minutes`.
    pub const fn minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    /// Get the value in minutes.
    pub const fn as_minutes(&self) -> i32 {
        self.0
    }

    /// Whether the no-data check is turned off.
    pub const fn is_disabled(&self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for NoDataTimeframe {
    fn from(minutes: i32) -> Self {
        Self(minutes)
    }
}

impl From<NoDataTimeframe> for i32 {
    fn from(tf: NoDataTimeframe) -> Self {
        tf.0
    }
}

impl Serialize for NoDataTimeframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for NoDataTimeframe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Buffer through Value: number tokens arrive in their textual form
        // under serde_json's arbitrary_precision feature.
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(Self::DISABLED),
            Value::Number(n) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(Self)
                .ok_or_else(|| {
                    de::Error::invalid_value(
                        Unexpected::Other(&format!("number {}", n)),
                        &"a 32-bit integer",
                    )
                }),
            Value::Bool(true) => Err(de::Error::invalid_type(
                Unexpected::Bool(true),
                &"an integer, false or null",
            )),
            Value::String(s) => Err(de::Error::invalid_type(
                Unexpected::Str(&s),
                &"an integer, false or null",
            )),
            Value::Array(_) => Err(de::Error::invalid_type(
                Unexpected::Seq,
                &"an integer, false or null",
            )),
            Value::Object(_) => Err(de::Error::invalid_type(
                Unexpected::Map,
                &"an integer, false or null",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> serde_json::Result<NoDataTimeframe> {
        serde_json::from_str(json)
    }

    #[test]
    fn false_is_disabled() {
        assert_eq!(decode("false").unwrap(), NoDataTimeframe(0));
    }

    #[test]
    fn null_is_disabled() {
        assert_eq!(decode("null").unwrap(), NoDataTimeframe(0));
    }

    #[test]
    fn integer_is_minutes() {
        assert_eq!(decode("45").unwrap(), NoDataTimeframe(45));
        assert_eq!(decode("-5").unwrap(), NoDataTimeframe(-5));
    }

    #[test]
    fn rejects_string() {
        assert!(decode("\"abc\"").is_err());
        // Quoted digits are still a string token
        assert!(decode("\"45\"").is_err());
    }

    #[test]
    fn rejects_true_and_fractions() {
        assert!(decode("true").is_err());
        assert!(decode("4.5").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(decode("2147483648").is_err());
        assert_eq!(decode("2147483647").unwrap(), NoDataTimeframe(i32::MAX));
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&NoDataTimeframe(10)).unwrap(), "10");
    }

    #[test]
    fn disabled_helpers() {
        assert!(NoDataTimeframe::default().is_disabled());
        assert!(!NoDataTimeframe::minutes(2).is_disabled());
        assert_eq!(i32::from(NoDataTimeframe::from(7)), 7);
    }
}
