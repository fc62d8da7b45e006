//! Monthly financial reporting.
//!
//! Reports are derived, never persisted: each request recomputes the
//! summary from the store's aggregates.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::{DuesTotals, ExpenseBreakdown, MonthlySummary, ReportPeriod};
