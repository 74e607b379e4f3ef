use studio_slots_bot::config::{Config, DEFAULT_SCHEDULE_BASE_URL};
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env() {
    for var in [
        "TELEGRAM_BOT_TOKEN",
        "TELEGRAM_CHAT_ID",
        "SCHEDULE_BASE_URL",
        "LOOKAHEAD_DAYS",
        "MIN_CAPACITY",
        "INSTRUCTOR_ID",
        "ALLOWED_CLASSES",
        "HOLIDAY_DATES",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_config_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert!(config.telegram_bot_token.is_none());
    assert!(config.telegram_chat_id.is_none());
    assert_eq!(config.schedule_base_url, DEFAULT_SCHEDULE_BASE_URL);
    assert_eq!(config.lookahead_days, 14);
    assert_eq!(config.min_capacity, 1);
    assert_eq!(config.instructor_id, Some(525));
    assert!(config.allowed_classes.is_none());
    assert!(config.holiday_dates.is_empty());
}

#[test]
fn test_config_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("TELEGRAM_CHAT_ID", "-100123");
    env::set_var("SCHEDULE_BASE_URL", "http://localhost:8080/api/v1");
    env::set_var("LOOKAHEAD_DAYS", "7");
    env::set_var("MIN_CAPACITY", "2");
    env::set_var("INSTRUCTOR_ID", "42");
    env::set_var("ALLOWED_CLASSES", "Yoga, Spin");
    env::set_var("HOLIDAY_DATES", "2024-01-01, 2024-12-25");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token.as_deref(), Some("test_token_123"));
    assert_eq!(config.telegram_chat_id.as_deref(), Some("-100123"));
    assert_eq!(config.schedule_base_url, "http://localhost:8080/api/v1");
    assert_eq!(config.lookahead_days, 7);
    assert_eq!(config.min_capacity, 2);
    assert_eq!(config.instructor_id, Some(42));
    assert_eq!(
        config.allowed_classes,
        Some(vec!["Yoga".to_string(), "Spin".to_string()])
    );
    assert_eq!(config.holiday_dates.len(), 2);

    clear_env();
}

#[test]
fn test_instructor_any_disables_filter() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("INSTRUCTOR_ID", "any");
    let config = Config::from_env().unwrap();
    assert!(config.instructor_id.is_none());

    clear_env();
}

#[test]
fn test_invalid_numeric_values_fail() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("LOOKAHEAD_DAYS", "soon");
    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid LOOKAHEAD_DAYS"));
    env::remove_var("LOOKAHEAD_DAYS");

    env::set_var("LOOKAHEAD_DAYS", "0");
    assert!(Config::from_env().is_err());
    env::remove_var("LOOKAHEAD_DAYS");

    env::set_var("MIN_CAPACITY", "-1");
    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid MIN_CAPACITY"));

    clear_env();
}

#[test]
fn test_invalid_holiday_date_fails() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("HOLIDAY_DATES", "01/01/2024");
    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid HOLIDAY_DATES"));

    clear_env();
}

#[test]
fn test_empty_credentials_treated_as_missing() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "");
    env::set_var("TELEGRAM_CHAT_ID", "  ");
    let config = Config::from_env().unwrap();

    assert!(config.telegram_bot_token.is_none());
    assert!(config.telegram_chat_id.is_none());

    clear_env();
}

#[test]
fn test_credentials_error_names_missing_variable() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();
    let err = config.credentials().unwrap_err();
    assert_eq!(err.to_string(), "TELEGRAM_BOT_TOKEN must be set");

    env::set_var("TELEGRAM_BOT_TOKEN", "token");
    let config = Config::from_env().unwrap();
    let err = config.credentials().unwrap_err();
    assert_eq!(err.to_string(), "TELEGRAM_CHAT_ID must be set");

    env::set_var("TELEGRAM_CHAT_ID", "12345");
    let config = Config::from_env().unwrap();
    let (token, chat_id) = config.credentials().unwrap();
    assert_eq!(token, "token");
    assert_eq!(chat_id, "12345");

    clear_env();
}
