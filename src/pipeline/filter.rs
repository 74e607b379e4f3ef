use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::config::Config;
use crate::error::BotResult;
use crate::models::{RawSession, Session};

/// Classification of a calendar day for the weekday-evening rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Weekend,
    Holiday,
}

/// Classifies a date against the configured holiday list. Holidays win over
/// the weekday/weekend split.
pub fn classify_day(date: NaiveDate, holidays: &[NaiveDate]) -> DayKind {
    if holidays.contains(&date) {
        return DayKind::Holiday;
    }
    if date.weekday().number_from_monday() >= 6 {
        return DayKind::Weekend;
    }
    DayKind::Weekday
}

/// The business rules a session must satisfy to appear in the summary.
#[derive(Debug, Clone)]
pub struct FilterRules {
    pub lookahead_days: i64,
    pub min_capacity: u32,
    pub instructor_id: Option<i64>,
    pub allowed_classes: Option<Vec<String>>,
    pub holiday_dates: Vec<NaiveDate>,
    /// On weekdays, only sessions starting strictly after this local time
    /// are eligible. `None` disables the rule.
    pub weekday_cutoff: Option<NaiveTime>,
}

impl FilterRules {
    pub fn from_config(config: &Config) -> Self {
        FilterRules {
            lookahead_days: config.lookahead_days,
            min_capacity: config.min_capacity,
            instructor_id: config.instructor_id,
            allowed_classes: config.allowed_classes.clone(),
            holiday_dates: config.holiday_dates.clone(),
            weekday_cutoff: NaiveTime::from_hms_opt(19, 0, 0),
        }
    }
}

/// Applies all eligibility predicates to the raw schedule records.
///
/// Pure function of its inputs: deterministic for identical records, `now`,
/// and rules. Source ordering is preserved. Records without a start time are
/// skipped; records with an unparseable start time fail the run.
pub fn filter_sessions(
    raw_sessions: &[RawSession],
    now: DateTime<Utc>,
    rules: &FilterRules,
) -> BotResult<Vec<Session>> {
    let window_end = now + Duration::days(rules.lookahead_days);
    let mut accepted = Vec::new();

    for raw in raw_sessions {
        if let Some(instructor_id) = rules.instructor_id {
            if raw.instructor != Some(instructor_id) {
                continue;
            }
        }

        // A non-null closed_at means booking is no longer open.
        if raw.closed_at.is_some() {
            continue;
        }

        let Some(session) = Session::try_from_raw(raw)? else {
            continue;
        };

        let start_utc = session.start_time.with_timezone(&Utc);
        if start_utc < now || start_utc > window_end {
            continue;
        }

        if session.available_spots < rules.min_capacity {
            continue;
        }

        if let Some(allowed) = &rules.allowed_classes {
            if !allowed
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&session.name))
            {
                continue;
            }
        }

        if let Some(cutoff) = rules.weekday_cutoff {
            // Local wall-clock date and time as reported by the provider.
            let day = classify_day(session.start_time.date_naive(), &rules.holiday_dates);
            if day == DayKind::Weekday && session.start_time.time() <= cutoff {
                continue;
            }
        }

        accepted.push(session);
    }

    Ok(accepted)
}
