use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// One record as returned by the provider's schedule listing endpoint.
/// Only the fields the pipeline consumes are deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSession {
    #[serde(default)]
    pub token: String,
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub available_spots: u32,
    pub instructor: Option<i64>,
    pub instructor_name: Option<String>,
    pub closed_at: Option<String>,
}

/// A validated, bookable class occurrence. Immutable once built; never
/// persisted beyond the current run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub available_spots: u32,
    pub instructor_label: String,
}

impl Session {
    /// Builds a `Session` from a raw provider record.
    ///
    /// Returns `Ok(None)` for records with no `start_time` at all (the
    /// provider emits these for placeholder slots; they are skipped
    /// silently). A present but unparseable timestamp or a missing token is
    /// malformed data and fails with a format error.
    pub fn try_from_raw(raw: &RawSession) -> BotResult<Option<Self>> {
        let Some(start_raw) = raw.start_time.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        if raw.token.trim().is_empty() {
            return Err(BotError::Format(format!(
                "session record with start_time {} has no token",
                start_raw
            )));
        }

        let start_time = parse_provider_time(start_raw)?;
        let end_time = match raw.end_time.as_deref().filter(|s| !s.is_empty()) {
            Some(end_raw) => Some(parse_provider_time(end_raw)?),
            None => None,
        };

        Ok(Some(Session {
            token: raw.token.clone(),
            name: raw.name.clone().unwrap_or_else(|| "Class".to_string()),
            start_time,
            end_time,
            available_spots: raw.available_spots,
            instructor_label: raw.instructor_name.clone().unwrap_or_default(),
        }))
    }
}

fn parse_provider_time(raw: &str) -> BotResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }

    // Some payloads omit the offset; those are taken as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(BotError::Format(format!("invalid start_time value: {}", raw)))
}

/// The outcome of one fetch+filter run: the accepted sessions in source
/// order plus timing metadata. Read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResult {
    pub sessions: Vec<Session>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
}

impl FilterResult {
    pub fn new(
        sessions: Vec<Session>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let elapsed = finished_at - started_at;
        let elapsed_seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        FilterResult {
            sessions,
            started_at,
            finished_at,
            elapsed_seconds,
        }
    }
}

/// A formatted summary ready for delivery. Built once by the formatter and
/// consumed exactly once by the dispatcher.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// HTML rendering sent to Telegram (`parse_mode=HTML`).
    pub html: String,
    /// Plain rendering for stdout, logs, and the CI step summary.
    pub plain_text: String,
    /// Destination chat; `None` in dry-run mode.
    pub chat_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(token: &str, start: Option<&str>) -> RawSession {
        RawSession {
            token: token.to_string(),
            name: Some("Bike 45".to_string()),
            start_time: start.map(str::to_string),
            end_time: None,
            available_spots: 4,
            instructor: Some(525),
            instructor_name: Some("Lu Costa".to_string()),
            closed_at: None,
        }
    }

    #[test]
    fn builds_session_from_valid_record() {
        let session = Session::try_from_raw(&raw("abc123", Some("2025-11-14T19:30:00-03:00")))
            .unwrap()
            .unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.name, "Bike 45");
        assert_eq!(session.available_spots, 4);
        assert_eq!(session.start_time.to_rfc3339(), "2025-11-14T19:30:00-03:00");
    }

    #[test]
    fn skips_record_without_start_time() {
        assert!(Session::try_from_raw(&raw("abc123", None)).unwrap().is_none());
        assert!(Session::try_from_raw(&raw("abc123", Some("")))
            .unwrap()
            .is_none());
    }

    #[test]
    fn accepts_offsetless_start_time_as_utc() {
        let session = Session::try_from_raw(&raw("abc123", Some("2024-01-01T10:00")))
            .unwrap()
            .unwrap();
        assert_eq!(session.start_time.to_rfc3339(), "2024-01-01T10:00:00+00:00");

        let with_seconds = Session::try_from_raw(&raw("abc123", Some("2024-01-01T10:00:30")))
            .unwrap()
            .unwrap();
        assert_eq!(
            with_seconds.start_time.to_rfc3339(),
            "2024-01-01T10:00:30+00:00"
        );
    }

    #[test]
    fn rejects_unparseable_start_time() {
        let err = Session::try_from_raw(&raw("abc123", Some("tomorrow at 7"))).unwrap_err();
        assert!(err.to_string().contains("invalid start_time"));
    }

    #[test]
    fn rejects_missing_token() {
        let err = Session::try_from_raw(&raw("", Some("2025-11-14T19:30:00-03:00"))).unwrap_err();
        assert!(err.to_string().contains("no token"));
    }

    #[test]
    fn filter_result_computes_elapsed_seconds() {
        let started = Utc::now();
        let finished = started + chrono::Duration::milliseconds(2500);
        let result = FilterResult::new(Vec::new(), started, finished);
        assert!((result.elapsed_seconds - 2.5).abs() < f64::EPSILON);
    }
}
