//! `SeaORM` entity definitions.

pub mod dues;
pub mod expenses;
pub mod organizations;
pub mod residents;
pub mod sea_orm_active_enums;
pub mod units;
pub mod users;
