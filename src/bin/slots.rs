//! Runs the fetch+filter pipeline alone and prints the result as JSON.
//! Useful for inspecting what the notifier would announce without touching
//! Telegram at all.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_slots_bot::config::Config;
use studio_slots_bot::pipeline::filter::FilterRules;
use studio_slots_bot::pipeline::run::run_pipeline;
use studio_slots_bot::services::schedule::ScheduleClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_slots_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let source = ScheduleClient::new(&config.schedule_base_url, config.lookahead_days)?;
    let rules = FilterRules::from_config(&config);
    let result = run_pipeline(&source, &rules).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
