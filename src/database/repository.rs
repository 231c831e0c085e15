use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::record::{CredentialRecord, RecordRow};
use crate::types::RecordCategory;

/// Persistence seam for credential records. Every operation is scoped to
/// the owning user; a record owned by someone else is reported as missing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All of a user's records in insertion order
    async fn list(&self, category: RecordCategory, user_id: Uuid) -> Result<Vec<CredentialRecord>, DatabaseError>;

    async fn get(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<CredentialRecord, DatabaseError>;

    async fn insert(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError>;

    /// Replace the payload of an existing record
    async fn update(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError>;

    async fn delete(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError>;
}

/// Load order for a user's records; `seq` is assigned on insert
fn list_sql(category: RecordCategory) -> String {
    format!(
        "SELECT id, user_id, data, created_at, updated_at FROM \"{}\" WHERE user_id = $1 ORDER BY seq",
        category.table_name()
    )
}

fn not_found(category: RecordCategory, id: Uuid) -> DatabaseError {
    DatabaseError::NotFound(format!("{} record {} not found", category, id))
}

/// Postgres-backed store, one table per category with a JSONB payload
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list(&self, category: RecordCategory, user_id: Uuid) -> Result<Vec<CredentialRecord>, DatabaseError> {
        let sql = list_sql(category);
        let rows = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|row| row.into_record(category)).collect())
    }

    async fn get(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<CredentialRecord, DatabaseError> {
        let sql = format!(
            "SELECT id, user_id, data, created_at, updated_at FROM \"{}\" WHERE id = $1 AND user_id = $2",
            category.table_name()
        );
        sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into_record(category))
            .ok_or_else(|| not_found(category, id))
    }

    async fn insert(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError> {
        let sql = format!(
            "INSERT INTO \"{}\" (id, user_id, data) VALUES ($1, $2, $3)
             RETURNING id, user_id, data, created_at, updated_at",
            category.table_name()
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(sqlx::types::Json(fields))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into_record(category))
    }

    async fn update(
        &self,
        category: RecordCategory,
        user_id: Uuid,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<CredentialRecord, DatabaseError> {
        let sql = format!(
            "UPDATE \"{}\" SET data = $3, updated_at = now() WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, data, created_at, updated_at",
            category.table_name()
        );
        sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(sqlx::types::Json(fields))
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into_record(category))
            .ok_or_else(|| not_found(category, id))
    }

    async fn delete(&self, category: RecordCategory, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE id = $1 AND user_id = $2",
            category.table_name()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(category, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_follows_insertion_sequence() {
        let sql = list_sql(RecordCategory::Education);
        assert!(sql.contains("FROM \"education_records\""));
        assert!(sql.contains("WHERE user_id = $1"));
        assert!(sql.trim_end().ends_with("ORDER BY seq"));
    }
}
