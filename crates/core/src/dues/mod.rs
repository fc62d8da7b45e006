//! Periodic due lifecycle rules.
//!
//! A due is a scheduled charge owed by a unit, tracked through
//! pending/paid/overdue states. Transitions only go forward:
//! pending -> paid (explicit payment) and pending -> overdue (sweep).

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::DueError;
pub use service::DueService;
pub use types::{CreateBulkDues, CreateDue, DueStatus, PaymentMethod};
