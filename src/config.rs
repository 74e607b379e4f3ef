use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::env;

use crate::error::{BotError, BotResult};

/// Default provider API root, overridable via SCHEDULE_BASE_URL for tests.
pub const DEFAULT_SCHEDULE_BASE_URL: &str = "https://studiovelocity.com.br/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub schedule_base_url: String,
    pub lookahead_days: i64,
    pub min_capacity: u32,
    pub instructor_id: Option<i64>,
    pub allowed_classes: Option<Vec<String>>,
    pub holiday_dates: Vec<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let telegram_chat_id = env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let schedule_base_url = env::var("SCHEDULE_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEDULE_BASE_URL.to_string());

        let lookahead_days = match env::var("LOOKAHEAD_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| anyhow!("Invalid LOOKAHEAD_DAYS"))?,
            Err(_) => 14,
        };

        let min_capacity = match env::var("MIN_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_CAPACITY"))?,
            Err(_) => 1,
        };

        let instructor_id = match env::var("INSTRUCTOR_ID") {
            Ok(raw) if raw.trim().eq_ignore_ascii_case("any") => None,
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid INSTRUCTOR_ID"))?,
            ),
            Err(_) => Some(525),
        };

        let allowed_classes = env::var("ALLOWED_CLASSES").ok().and_then(|raw| {
            let list: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if list.is_empty() {
                None
            } else {
                Some(list)
            }
        });

        let holiday_dates = match env::var("HOLIDAY_DATES") {
            Ok(raw) => parse_holiday_dates(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Config {
            telegram_bot_token,
            telegram_chat_id,
            schedule_base_url,
            lookahead_days,
            min_capacity,
            instructor_id,
            allowed_classes,
            holiday_dates,
        })
    }

    /// Returns the bot token and chat id, or a credentials error naming the
    /// first missing variable. Live mode calls this before any network I/O.
    pub fn credentials(&self) -> BotResult<(&str, &str)> {
        let token = self
            .telegram_bot_token
            .as_deref()
            .ok_or(BotError::Credentials("TELEGRAM_BOT_TOKEN"))?;
        let chat_id = self
            .telegram_chat_id
            .as_deref()
            .ok_or(BotError::Credentials("TELEGRAM_CHAT_ID"))?;
        Ok((token, chat_id))
    }
}

fn parse_holiday_dates(raw: &str) -> Result<Vec<NaiveDate>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| anyhow!("Invalid HOLIDAY_DATES entry: {}", s))
        })
        .collect()
}
