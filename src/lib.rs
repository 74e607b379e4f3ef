//! # Studio Slots Bot
//!
//! A scheduled automation that fetches open studio class sessions, filters
//! them by business rules, and posts a summary to a Telegram chat.
//!
//! ## Pipeline
//! One linear pass per invocation: fetch → filter → format → send. No
//! persistence, no retries; scheduling lives in the CI cron trigger.

/// Configuration management and environment variables
pub mod config;
/// Error kinds surfaced by the pipeline
pub mod error;
/// Domain objects: sessions, filter results, notification messages
pub mod models;
/// Filter, formatter, and run orchestration stages
pub mod pipeline;
/// HTTP clients for the schedule provider and the Telegram Bot API
pub mod services;
/// Utility functions for datetime formatting and run logs
pub mod utils;
