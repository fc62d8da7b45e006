//! Due data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Charge issued, not yet paid.
    Pending,
    /// Charge settled by the resident.
    Paid,
    /// Pending charge whose due date has passed.
    Overdue,
}

impl DueStatus {
    /// Parses a status from its stored text form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Returns the stored text form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a due was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment collected in person.
    Cash,
    /// Bank transfer.
    Transfer,
    /// Online payment.
    Online,
}

impl PaymentMethod {
    /// Parses a payment method from its stored text form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            "online" => Some(Self::Online),
            _ => None,
        }
    }

    /// Returns the stored text form of this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Online => "online",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated command to create a single due.
#[derive(Debug, Clone)]
pub struct CreateDue {
    /// Target unit.
    pub unit_id: Uuid,
    /// Charge amount (strictly positive).
    pub amount: Decimal,
    /// Calendar date the charge falls due.
    pub due_date: NaiveDate,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Validated command to create one due per unit of an organization.
#[derive(Debug, Clone)]
pub struct CreateBulkDues {
    /// Charge amount applied to every unit.
    pub amount: Decimal,
    /// Calendar date the charges fall due.
    pub due_date: NaiveDate,
    /// Optional free-text description shared by all rows.
    pub description: Option<String>,
}
