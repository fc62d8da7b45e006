//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod due;
pub mod expense;
pub mod organization;
pub mod report;
pub mod resident;
pub mod unit;
pub mod user;

pub use due::{DueFilter, DueRepository, DueRepositoryError, DueWithDetails};
pub use expense::{ExpenseFilter, ExpenseRepository, ExpenseRepositoryError};
pub use organization::{OrganizationRepository, OrganizationRepositoryError, UpdateOrganization};
pub use report::ReportRepository;
pub use resident::{ResidentRepository, ResidentRepositoryError, UpdateResident};
pub use unit::{UnitRepository, UnitRepositoryError, UnitWithResident, UpdateUnit};
pub use user::UserRepository;
