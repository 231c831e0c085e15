use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::record::CredentialRecord;
use crate::database::repository::RecordStore;
use crate::types::RecordCategory;

/// In-memory record store for service tests; keeps insertion order like
/// the Postgres store's `ORDER BY seq`.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<CredentialRecord>>,
}

fn not_found(id: Uuid) -> DatabaseError {
    DatabaseError::NotFound(format!("record {} not found", id))
}

fn owned(record: &CredentialRecord, category: RecordCategory, user_id: Uuid) -> bool {
    record.category == category && record.user_id == user_id
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, category: RecordCategory, user_id: Uuid) -> Result<Vec<CredentialRecord>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| owned(r, category, user_id)).cloned().collect())
    }

    async fn get(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<CredentialRecord, DatabaseError> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id == id && owned(r, category, user_id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn insert(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError> {
        let record = CredentialRecord::new(category, user_id, fields);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id && owned(r, category, user_id))
            .ok_or_else(|| not_found(id))?;
        record.fields = fields;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id == id && owned(r, category, user_id)));
        if records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
