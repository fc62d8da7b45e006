//! Resident repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::residents;

/// Error types for resident operations.
#[derive(Debug, thiserror::Error)]
pub enum ResidentRepositoryError {
    /// Resident not found in this organization.
    #[error("resident not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Fields that can change on a resident.
#[derive(Debug, Clone, Default)]
pub struct UpdateResident {
    /// New full name, if changing.
    pub full_name: Option<String>,
    /// New phone, if changing.
    pub phone: Option<String>,
    /// New email, if changing.
    pub email: Option<String>,
    /// Unit to link, if changing.
    pub unit_id: Option<Uuid>,
}

/// Resident repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ResidentRepository {
    db: DatabaseConnection,
}

impl ResidentRepository {
    /// Creates a new resident repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new resident in an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        organization_id: Uuid,
        full_name: &str,
        phone: &str,
        email: Option<String>,
        unit_id: Option<Uuid>,
    ) -> Result<residents::Model, ResidentRepositoryError> {
        let now = chrono::Utc::now().into();
        let resident = residents::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            full_name: Set(full_name.to_string()),
            phone: Set(phone.to_string()),
            email: Set(email),
            unit_id: Set(unit_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(resident.insert(&self.db).await?)
    }

    /// Finds a resident by ID within an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<residents::Model>, ResidentRepositoryError> {
        Ok(residents::Entity::find_by_id(id)
            .filter(residents::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?)
    }

    /// Lists an organization's residents ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<residents::Model>, ResidentRepositoryError> {
        Ok(residents::Entity::find()
            .filter(residents::Column::OrganizationId.eq(organization_id))
            .order_by_asc(residents::Column::FullName)
            .all(&self.db)
            .await?)
    }

    /// Applies a partial update inside a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the resident does not exist in this
    /// organization.
    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        changes: UpdateResident,
    ) -> Result<residents::Model, ResidentRepositoryError> {
        let txn = self.db.begin().await?;

        let resident = residents::Entity::find_by_id(id)
            .filter(residents::Column::OrganizationId.eq(organization_id))
            .one(&txn)
            .await?
            .ok_or(ResidentRepositoryError::NotFound(id))?;

        let mut active: residents::ActiveModel = resident.into();
        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = changes.email {
            active.email = Set(Some(email));
        }
        if let Some(unit_id) = changes.unit_id {
            active.unit_id = Set(Some(unit_id));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes a resident within an organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matched.
    pub async fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<(), ResidentRepositoryError> {
        let result = residents::Entity::delete_many()
            .filter(residents::Column::Id.eq(id))
            .filter(residents::Column::OrganizationId.eq(organization_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ResidentRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
