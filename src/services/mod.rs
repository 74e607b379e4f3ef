/// Provider schedule listing client
pub mod schedule;
/// Telegram Bot API delivery
pub mod telegram;
