//! Tolerant decoding helpers for backend payloads.
//!
//! The backend omits fields, sends `null` for lists and mixes numeric and
//! string ids. Absence always decodes to the empty/default value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Interpret a JSON value as an id: integers, integral floats and numeric strings.
pub fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `deserialize_with` for optional ids.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// `deserialize_with` for required ids; unparseable or missing becomes `0`.
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_id(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` for lists whose entries may be malformed. `null` or a
/// non-list becomes empty; entries that are `null` or fail to decode are
/// skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(other) => {
            warn!("Expected a list, got {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter(|item| !item.is_null())
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Skipping malformed list entry: {}", e);
                None
            }
        })
        .collect())
}

/// `deserialize_with` for optional text; numbers are kept as their decimal
/// form, other shapes become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `deserialize_with` for optional flags: booleans, `"true"`/`"false"` in
/// any case, and `0`/`1`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().to_ascii_lowercase().parse().ok(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    })
}

/// Parse the timestamp formats the backend emits: RFC 3339, naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC), or a bare date at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` for optional timestamps; unparseable values become `None`.
pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_value() {
        assert_eq!(id_from_value(&json!(42)), Some(42));
        assert_eq!(id_from_value(&json!(42.0)), Some(42));
        assert_eq!(id_from_value(&json!(" 17 ")), Some(17));
        assert_eq!(id_from_value(&json!(4.5)), None);
        assert_eq!(id_from_value(&json!("abc")), None);
        assert_eq!(id_from_value(&json!(null)), None);
        assert_eq!(id_from_value(&json!({"id": 3})), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2024-03-05T10:15:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-05T10:15:00+00:00");

        let ts = parse_timestamp("2024-03-05T10:15:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);

        let ts = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-05T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "list")]
        items: Vec<i64>,
        #[serde(deserialize_with = "opt_string")]
        label: Option<String>,
        #[serde(deserialize_with = "opt_bool")]
        flag: Option<bool>,
    }

    #[test]
    fn test_lenient_fields() {
        let sample: Sample = serde_json::from_value(json!({
            "items": [1, "two", null, 3],
            "label": 42,
            "flag": "FALSE"
        }))
        .unwrap();
        assert_eq!(sample.items, vec![1, 3]);
        assert_eq!(sample.label.as_deref(), Some("42"));
        assert_eq!(sample.flag, Some(false));

        let sample: Sample =
            serde_json::from_value(json!({"items": {"a": 1}, "label": [], "flag": 1})).unwrap();
        assert!(sample.items.is_empty());
        assert!(sample.label.is_none());
        assert_eq!(sample.flag, Some(true));
    }
}
