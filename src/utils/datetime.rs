use chrono::{DateTime, FixedOffset, Utc};

/// Day header used when grouping sessions, e.g. "02/01/2024 (Tuesday)".
pub fn format_day_header(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%d/%m/%Y (%A)").to_string()
}

/// Wall-clock start time in the provider's own offset, e.g. "19:30".
pub fn format_start_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%H:%M").to_string()
}

/// Compact UTC timestamp for the run-timing trailer.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
