use chrono::Utc;
use tracing::info;

use crate::error::BotResult;
use crate::models::FilterResult;
use crate::pipeline::filter::{filter_sessions, FilterRules};
use crate::services::schedule::SessionSource;

/// Runs fetch+filter once and wraps the accepted sessions with the run
/// timing metadata. One invocation, no retries; any failure propagates.
pub async fn run_pipeline(
    source: &dyn SessionSource,
    rules: &FilterRules,
) -> BotResult<FilterResult> {
    let started_at = Utc::now();

    let raw_sessions = source.fetch_sessions().await?;
    info!("Fetched {} schedule records", raw_sessions.len());

    let sessions = filter_sessions(&raw_sessions, started_at, rules)?;
    info!("{} sessions passed the business rules", sessions.len());

    let finished_at = Utc::now();
    Ok(FilterResult::new(sessions, started_at, finished_at))
}
