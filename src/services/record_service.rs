use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::record::{validate_input, CredentialRecord, RecordError};
use crate::database::repository::RecordStore;
use crate::ranking::{insert_by_rank, sort_by_rank};
use crate::types::RecordCategory;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Result of a write: the touched record and the user's ordered collection
#[derive(Debug, Clone)]
pub struct RecordChange {
    pub record: CredentialRecord,
    pub records: Vec<CredentialRecord>,
}

/// Record flows for one user, with display ordering applied on every read
pub struct RecordService<S> {
    store: S,
}

impl<S: RecordStore> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and fully sort a user's records
    pub async fn list(&self, category: RecordCategory, user_id: Uuid) -> Result<Vec<CredentialRecord>, ServiceError> {
        let records = self.store.list(category, user_id).await?;
        Ok(sort_by_rank(&records, category.rank_table()))
    }

    pub async fn get(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<CredentialRecord, ServiceError> {
        Ok(self.store.get(category, user_id, id).await?)
    }

    /// Create a record and place it into the already ordered collection
    /// without re-sorting the rest.
    pub async fn create(&self, category: RecordCategory, user_id: Uuid, input: Value) -> Result<RecordChange, ServiceError> {
        let fields = validate_input(category, input)?;
        let current = self.list(category, user_id).await?;
        let record = self.store.insert(category, user_id, fields).await?;
        debug!("Created {} record {} for user {}", category, record.id, user_id);

        let records = insert_by_rank(&current, record.clone(), category.rank_table());
        Ok(RecordChange { record, records })
    }

    /// Replace a record's payload and return the re-sorted collection
    pub async fn update(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        id: Uuid,
        input: Value,
    ) -> Result<RecordChange, ServiceError> {
        let fields = validate_input(category, input)?;
        let record = self.store.update(category, user_id, id, fields).await?;
        debug!("Updated {} record {} for user {}", category, id, user_id);

        let records = self.list(category, user_id).await?;
        Ok(RecordChange { record, records })
    }

    /// Delete a record and return the re-sorted remainder
    pub async fn delete(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<Vec<CredentialRecord>, ServiceError> {
        self.store.delete(category, user_id, id).await?;
        debug!("Deleted {} record {} for user {}", category, id, user_id);
        self.list(category, user_id).await
    }
}
