//! Core business logic for Konak.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `dues` - Periodic due lifecycle: validation, payment methods, overdue rules
//! - `expense` - Expense validation and category vocabulary
//! - `report` - Monthly financial summary arithmetic and report periods
//! - `auth` - Password hashing and role definitions
//! - `notification` - Due reminder formatting (SMS delivery is stubbed)
//! - `payment` - Payment link generation (provider integration is stubbed)

pub mod auth;
pub mod dues;
pub mod expense;
pub mod notification;
pub mod payment;
pub mod report;
