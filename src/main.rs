//! # Studio Slots Bot Notification Entry Point
//!
//! Runs the full pipeline and delivers the summary: loads configuration,
//! fetches and filters the schedule, formats the message, and either sends
//! it to Telegram or prints it in dry-run mode.

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_slots_bot::config::Config;
use studio_slots_bot::pipeline::filter::FilterRules;
use studio_slots_bot::pipeline::format::format_summary;
use studio_slots_bot::pipeline::run::run_pipeline;
use studio_slots_bot::services::schedule::ScheduleClient;
use studio_slots_bot::services::telegram::{deliver, TelegramSink};
use studio_slots_bot::utils::run_log::append_step_summary;

#[derive(Debug, Parser)]
#[command(
    name = "studio-slots-bot",
    about = "Collects open class slots and sends the summary via Telegram. \
             Use --dry-run to print the message locally instead."
)]
struct Args {
    /// Print the summary to stdout instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Telegram bot token; overrides TELEGRAM_BOT_TOKEN when given
    #[arg(long)]
    token: Option<String>,

    /// Telegram chat identifier; overrides TELEGRAM_CHAT_ID when given
    #[arg(long)]
    chat_id: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_slots_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    if args.token.is_some() {
        config.telegram_bot_token = args.token;
    }
    if args.chat_id.is_some() {
        config.telegram_chat_id = args.chat_id;
    }

    info!("Starting studio-slots-bot v{}", env!("CARGO_PKG_VERSION"));

    // In live mode the credentials are checked before any network call, so
    // a misconfigured run fails without touching the provider.
    let credentials = if args.dry_run {
        None
    } else {
        let (token, chat_id) = config.credentials()?;
        Some((token.to_string(), chat_id.to_string()))
    };

    let source = ScheduleClient::new(&config.schedule_base_url, config.lookahead_days)?;
    let rules = FilterRules::from_config(&config);
    let result = run_pipeline(&source, &rules).await?;

    let chat_id = credentials.as_ref().map(|(_, chat_id)| chat_id.as_str());
    let message = format_summary(&result, chat_id)?;

    if let Ok(path) = env::var("GITHUB_STEP_SUMMARY") {
        if let Err(e) = append_step_summary(&PathBuf::from(path), &message.plain_text) {
            tracing::warn!("Failed to append step summary: {}", e);
        }
    }

    if args.dry_run {
        println!("{}", message.plain_text);
        return Ok(());
    }

    if result.sessions.is_empty() {
        // Nothing to announce; print instead of pinging the chat.
        println!("{}", message.plain_text);
        return Ok(());
    }

    if let Some((token, chat_id)) = &credentials {
        let sink = TelegramSink::new(token, chat_id)?;
        deliver(&sink, &message).await?;
        info!(
            "Summary with {} sessions delivered in {:.2}s",
            result.sessions.len(),
            result.elapsed_seconds
        );
    }
    Ok(())
}
