use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Renders a payload timestamp as a local date-time string.
///
/// Accepts RFC 3339 strings (converted to local time), offset-less ISO-8601
/// strings (taken as local already), bare dates, and epoch milliseconds.
pub fn format_timestamp(value: &Value) -> Option<String> {
    let local = match value {
        Value::String(raw) => parse_timestamp(raw)?,
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|millis| millis as i64))?;
            DateTime::from_timestamp_millis(millis)?
                .with_timezone(&Local)
                .naive_local()
        }
        _ => return None,
    };
    Some(local.format(DISPLAY_FORMAT).to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
