use jiff::Timestamp;

/// Current UTC time as RFC 3339 with second precision (`2024-05-01T09:30:00Z`)
pub fn utc_timestamp() -> String {
    format_timestamp(Timestamp::now())
}

fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
}
