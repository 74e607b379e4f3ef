use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{BotError, BotResult};
use crate::models::RawSession;

/// Explicit per-request timeout; the provider gives no SLA so the runs must
/// not hang until the CI job limit.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The listing is paged; the lookahead window fits in the first two pages.
const SCHEDULE_PAGES: [u32; 2] = [1, 2];

/// Abstraction over the class-booking provider so tests can substitute a
/// fake instead of performing network I/O.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Fetches the raw session records for the configured lookahead window.
    async fn fetch_sessions(&self) -> BotResult<Vec<RawSession>>;
}

#[derive(Debug, Deserialize)]
struct SchedulePage {
    #[serde(default)]
    results: Vec<RawSession>,
}

/// HTTP client for the provider's schedule listing endpoint.
pub struct ScheduleClient {
    client: Client,
    base_url: String,
    lookahead_days: i64,
}

impl ScheduleClient {
    pub fn new(base_url: &str, lookahead_days: i64) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(ScheduleClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            lookahead_days,
        })
    }

    async fn fetch_page(
        &self,
        page: u32,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> BotResult<Vec<RawSession>> {
        let url = format!("{}/events/schedule/", self.base_url);
        let params: Vec<(&str, String)> = vec![
            ("sort", "start_time".to_string()),
            ("is_canceled", "false".to_string()),
            ("unit_list", "35".to_string()),
            ("activity_list", "1".to_string()),
            ("timezone_from_unit", "35".to_string()),
            ("page", page.to_string()),
            ("date_from", date_from.format("%Y-%m-%d").to_string()),
            ("date_to", date_to.format("%Y-%m-%d").to_string()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Network(format!(
                "schedule endpoint returned {} for page {}",
                status, page
            )));
        }

        let payload: SchedulePage = response
            .json()
            .await
            .map_err(|e| BotError::Format(format!("unexpected schedule payload: {}", e)))?;

        debug!("Page {} returned {} records", page, payload.results.len());
        Ok(payload.results)
    }
}

#[async_trait]
impl SessionSource for ScheduleClient {
    async fn fetch_sessions(&self) -> BotResult<Vec<RawSession>> {
        let date_from = Utc::now().date_naive();
        let date_to = date_from + Duration::days(self.lookahead_days);

        let mut aggregated = Vec::new();
        for page in SCHEDULE_PAGES {
            aggregated.extend(self.fetch_page(page, date_from, date_to).await?);
        }
        Ok(aggregated)
    }
}
