/// Eligibility predicates applied to raw schedule records
pub mod filter;
/// Summary rendering and message splitting
pub mod format;
/// Timed fetch+filter orchestration
pub mod run;
