//! Common repository traits
//!
//! This module defines generic interfaces for database operations.
//! Invitations are never hard-deleted, so there is no `Delete` trait, and status
//! changes go through the conditional updates of `InvitationRepository` instead
//! of a generic `Update`.

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Arguments
    /// * `data` - DTO containing the data for creation (without ID)
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key (e.g. `i32`, `(i32, i32)`)
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}
