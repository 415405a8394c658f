use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient date field: accepts RFC 3339, a bare `YYYY-MM-DD`, or the store's
/// `{"$date": "..."}` wrapper. Anything else reads as absent.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = value.as_ref().and_then(parse_value);
    if parsed.is_none() {
        if let Some(raw) = value.filter(|v| !v.is_null()) {
            tracing::debug!("Ignoring unparseable date value: {}", raw);
        }
    }
    Ok(parsed)
}

pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Object(map) => map.get("$date").and_then(parse_value),
        _ => None,
    }
}

pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `March 4, 2024`
pub fn format_long(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}
