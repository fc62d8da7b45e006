//! Organization repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::organizations;

/// Error types for organization operations.
#[derive(Debug, thiserror::Error)]
pub enum OrganizationRepositoryError {
    /// Organization not found.
    #[error("organization not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Fields that can change on an organization.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrganization {
    /// New name, if changing.
    pub name: Option<String>,
    /// New address, if changing.
    pub address: Option<String>,
    /// New unit count, if changing.
    pub total_units: Option<i32>,
    /// New standard monthly due amount, if changing.
    pub monthly_due_amount: Option<Decimal>,
}

/// Organization repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new organization owned by the given manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        name: &str,
        address: &str,
        total_units: i32,
        monthly_due_amount: Decimal,
        manager_id: Uuid,
    ) -> Result<organizations::Model, OrganizationRepositoryError> {
        let now = chrono::Utc::now().into();
        let org = organizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            address: Set(address.to_string()),
            total_units: Set(total_units),
            monthly_due_amount: Set(monthly_due_amount),
            manager_id: Set(manager_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(org.insert(&self.db).await?)
    }

    /// Finds an organization by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<organizations::Model>, OrganizationRepositoryError> {
        Ok(organizations::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists organizations managed by a user, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_manager(
        &self,
        manager_id: Uuid,
    ) -> Result<Vec<organizations::Model>, OrganizationRepositoryError> {
        Ok(organizations::Entity::find()
            .filter(organizations::Column::ManagerId.eq(manager_id))
            .order_by_asc(organizations::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Applies a partial update inside a single transaction.
    ///
    /// The read and write share one transaction so concurrent updates
    /// cannot interleave between them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the organization does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateOrganization,
    ) -> Result<organizations::Model, OrganizationRepositoryError> {
        let txn = self.db.begin().await?;

        let org = organizations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(OrganizationRepositoryError::NotFound(id))?;

        let mut active: organizations::ActiveModel = org.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(address) = changes.address {
            active.address = Set(address);
        }
        if let Some(total_units) = changes.total_units {
            active.total_units = Set(total_units);
        }
        if let Some(amount) = changes.monthly_due_amount {
            active.monthly_due_amount = Set(amount);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes an organization and all tenant-scoped rows (cascade).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the organization does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), OrganizationRepositoryError> {
        let result = organizations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(OrganizationRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
