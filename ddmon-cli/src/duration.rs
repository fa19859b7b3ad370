use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};

/// Suffix to seconds multiplier
const UNITS: &[(&str, u64)] = &[
    ("s", 1),
    ("m", 60),
    ("h", 3_600),
    ("d", 86_400),
    ("w", 604_800),
];

/// Parse mute lengths like "90s", "15m", "2h", "1d"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: u64 = val_str.parse()?;
            let Some(secs) = val.checked_mul(*multiplier) else {
                bail!("Duration too large: {}", s);
            };
            return Ok(Duration::from_secs(secs));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Unix time `d` from now, as sent in a mute `end`.
pub fn end_after(d: Duration) -> Result<i64> {
    let Some(end) = SystemTime::now().checked_add(d) else {
        bail!("Mute end is out of range");
    };
    let secs = end.duration_since(UNIX_EPOCH)?.as_secs();
    Ok(i64::try_from(secs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7_200));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_duration(" 1w ").unwrap(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("1.5h").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("-1m").is_err());
    }

    #[test]
    fn test_end_after_is_in_the_future() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let end = end_after(Duration::from_secs(3_600)).unwrap();
        assert!(end >= now + 3_600);
        assert!(end <= now + 3_601);
    }

    #[test]
    fn test_parse_overflow() {
        assert!(parse_duration("40000000000000w").is_err());
        assert!(parse_duration("18446744073709551615m").is_err());
        assert_eq!(
            parse_duration("18446744073709551615s").unwrap(),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_end_after_out_of_range() {
        assert!(end_after(Duration::from_secs(u64::MAX)).is_err());
        assert!(end_after(parse_duration("15250284452471w").unwrap()).is_err());
    }
}
