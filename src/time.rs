use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Timestamp as sent by the API in `createdAt` fields.
/// Accepts RFC 3339 strings (with or without offset) and unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(pub DateTime<Utc>);

impl Time {
    /// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` taken as UTC
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Time(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| Time(Utc.from_utc_datetime(&naive)))
    }

    /// Create a Time from unix milliseconds
    pub fn from_unix_milli(ms: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(ms).single().map(Time)
    }

    /// Get the timestamp in milliseconds
    pub fn unix_milli(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Short form used on the console
    pub fn short(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Render a raw `createdAt` value for display: parsed timestamps are
/// shortened, anything else is shown as-is.
pub fn display_timestamp(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => Time::parse(s).map(|t| t.short()).unwrap_or_else(|| s.clone()),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(Time::from_unix_milli)
            .map(|t| t.short())
            .unwrap_or_else(|| n.to_string()),
        serde_json::Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}
