//! Postgres enum mappings for `SeaORM` entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "due_status")]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    /// Charge issued, not yet paid.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Charge settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Pending charge whose due date has passed.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// How a due was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash payment collected in person.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Online payment.
    #[sea_orm(string_value = "online")]
    Online,
}
