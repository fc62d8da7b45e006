//! Unit repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{residents, units};

/// Error types for unit operations.
#[derive(Debug, thiserror::Error)]
pub enum UnitRepositoryError {
    /// Unit not found in this organization.
    #[error("unit not found: {0}")]
    NotFound(Uuid),

    /// Assigned resident not found in this organization.
    #[error("resident not found: {0}")]
    ResidentNotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Fields that can change on a unit.
#[derive(Debug, Clone, Default)]
pub struct UpdateUnit {
    /// New unit number, if changing.
    pub unit_number: Option<String>,
    /// New floor, if changing.
    pub floor: Option<i32>,
    /// Resident to assign, if changing.
    pub resident_id: Option<Uuid>,
}

/// A unit joined with its resident's display name.
#[derive(Debug, Clone, Serialize)]
pub struct UnitWithResident {
    /// The unit row.
    #[serde(flatten)]
    pub unit: units::Model,
    /// Resident full name, when a resident is assigned.
    pub resident_name: Option<String>,
}

/// Unit repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new unit in an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        organization_id: Uuid,
        unit_number: &str,
        floor: i32,
    ) -> Result<units::Model, UnitRepositoryError> {
        let now = chrono::Utc::now().into();
        let unit = units::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            unit_number: Set(unit_number.to_string()),
            floor: Set(floor),
            resident_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(unit.insert(&self.db).await?)
    }

    /// Finds a unit by ID within an organization, with its resident name.
    ///
    /// The organization filter is the tenant boundary: a unit owned by
    /// another organization reads as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<UnitWithResident>, UnitRepositoryError> {
        let found = units::Entity::find_by_id(id)
            .filter(units::Column::OrganizationId.eq(organization_id))
            .find_also_related(residents::Entity)
            .one(&self.db)
            .await?;

        Ok(found.map(|(unit, resident)| UnitWithResident {
            unit,
            resident_name: resident.map(|r| r.full_name),
        }))
    }

    /// Lists an organization's units ordered by floor then unit number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<UnitWithResident>, UnitRepositoryError> {
        let rows = units::Entity::find()
            .filter(units::Column::OrganizationId.eq(organization_id))
            .find_also_related(residents::Entity)
            .order_by_asc(units::Column::Floor)
            .order_by_asc(units::Column::UnitNumber)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(unit, resident)| UnitWithResident {
                unit,
                resident_name: resident.map(|r| r.full_name),
            })
            .collect())
    }

    /// Applies a partial update inside a single transaction.
    ///
    /// A resident assignment is verified to belong to the same
    /// organization before it is written.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the unit does not exist in this organization,
    /// `ResidentNotFound` if the assigned resident belongs elsewhere.
    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        changes: UpdateUnit,
    ) -> Result<units::Model, UnitRepositoryError> {
        let txn = self.db.begin().await?;

        let unit = units::Entity::find_by_id(id)
            .filter(units::Column::OrganizationId.eq(organization_id))
            .one(&txn)
            .await?
            .ok_or(UnitRepositoryError::NotFound(id))?;

        if let Some(resident_id) = changes.resident_id {
            let resident = residents::Entity::find_by_id(resident_id)
                .filter(residents::Column::OrganizationId.eq(organization_id))
                .one(&txn)
                .await?;
            if resident.is_none() {
                return Err(UnitRepositoryError::ResidentNotFound(resident_id));
            }
        }

        let mut active: units::ActiveModel = unit.into();
        if let Some(unit_number) = changes.unit_number {
            active.unit_number = Set(unit_number);
        }
        if let Some(floor) = changes.floor {
            active.floor = Set(floor);
        }
        if let Some(resident_id) = changes.resident_id {
            active.resident_id = Set(Some(resident_id));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes a unit within an organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matched.
    pub async fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<(), UnitRepositoryError> {
        let result = units::Entity::delete_many()
            .filter(units::Column::Id.eq(id))
            .filter(units::Column::OrganizationId.eq(organization_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(UnitRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
