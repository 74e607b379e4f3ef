/// Timestamp parsing and display helpers
pub mod datetime;
/// CI run log (step summary) output
pub mod run_log;
