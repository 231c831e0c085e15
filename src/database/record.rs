use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ranking::{extract_degree_type, Rankable};
use crate::types::RecordCategory;

/// Fields owned by the store, never accepted from API input
const SYSTEM_FIELDS: &[&str] = &["id", "user_id", "created_at", "updated_at"];

/// Errors that can occur while validating record input
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(&'static str),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),
}

/// A credential record with a loosely typed payload
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: RecordCategory,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape shared by every category table
#[derive(Debug, FromRow)]
pub struct RecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: sqlx::types::Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow {
    pub fn into_record(self, category: RecordCategory) -> CredentialRecord {
        CredentialRecord {
            id: self.id,
            user_id: self.user_id,
            category,
            fields: self.data.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Rank key for a loose field map: the category's rank field, reduced to
/// its short type label for degrees. Non-string values count as missing.
pub fn rank_key_for(category: RecordCategory, fields: &Map<String, Value>) -> Option<&str> {
    let value = fields.get(category.rank_field()?)?.as_str()?;
    match category {
        RecordCategory::Degree => Some(extract_degree_type(value)),
        _ => Some(value),
    }
}

/// Validate API input for a category and return the field map to persist
pub fn validate_input(category: RecordCategory, json: Value) -> Result<Map<String, Value>, RecordError> {
    let map = match json {
        Value::Object(map) => map,
        _ => return Err(RecordError::InvalidJson("Expected JSON object".to_string())),
    };

    if let Some(field) = SYSTEM_FIELDS.iter().find(|f| map.contains_key(**f)) {
        return Err(RecordError::SystemFieldNotAllowed(*field));
    }

    let missing: Vec<String> = category
        .required_fields()
        .iter()
        .filter(|field| !is_present(map.get(**field)))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RecordError::MissingRequiredFields(missing));
    }

    Ok(map)
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        _ => false,
    }
}

impl CredentialRecord {
    pub fn new(category: RecordCategory, user_id: Uuid, fields: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// API representation: payload fields flattened next to id and timestamps.
    /// Degree records also carry the short `type_label` used for badges.
    pub fn to_api_value(&self) -> Value {
        let mut out = self.fields.clone();
        out.insert("id".to_string(), json!(self.id));
        out.insert("category".to_string(), json!(self.category.slug()));
        out.insert("created_at".to_string(), json!(self.created_at));
        out.insert("updated_at".to_string(), json!(self.updated_at));
        if self.category == RecordCategory::Degree {
            if let Some(degree_type) = self.get_str("degree_type") {
                out.insert("type_label".to_string(), json!(extract_degree_type(degree_type)));
            }
        }
        Value::Object(out)
    }

    pub fn to_api_array(records: &[CredentialRecord]) -> Value {
        Value::Array(records.iter().map(CredentialRecord::to_api_value).collect())
    }
}

impl Rankable for CredentialRecord {
    fn rank_key(&self) -> Option<&str> {
        rank_key_for(self.category, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education_input() -> Value {
        json!({ "name": "张三", "school": "清华大学", "level": "本科", "major": "计算机科学与技术" })
    }

    #[test]
    fn accepts_complete_input() {
        let map = validate_input(RecordCategory::Education, education_input()).unwrap();
        assert_eq!(map.get("major").and_then(Value::as_str), Some("计算机科学与技术"));
    }

    #[test]
    fn accepts_unknown_level() {
        let mut input = education_input();
        input["level"] = json!("未知类别");
        assert!(validate_input(RecordCategory::Education, input).is_ok());
    }

    #[test]
    fn rejects_non_object() {
        let err = validate_input(RecordCategory::Exam, json!([1, 2])).unwrap_err();
        assert!(matches!(err, RecordError::InvalidJson(_)));
    }

    #[test]
    fn rejects_system_fields() {
        let mut input = education_input();
        input["user_id"] = json!(Uuid::new_v4());
        let err = validate_input(RecordCategory::Education, input).unwrap_err();
        assert!(matches!(err, RecordError::SystemFieldNotAllowed("user_id")));
    }

    #[test]
    fn reports_all_missing_or_blank_fields() {
        let err = validate_input(RecordCategory::Degree, json!({ "name": "  ", "school": 42 })).unwrap_err();
        match err {
            RecordError::MissingRequiredFields(fields) => {
                assert_eq!(fields, vec!["name", "school", "degree_type"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn degree_rank_key_uses_extracted_type() {
        let fields = validate_input(
            RecordCategory::Degree,
            json!({ "name": "李四", "school": "北京大学", "degree_type": "电子信息硕士专业学位" }),
        )
        .unwrap();
        let record = CredentialRecord::new(RecordCategory::Degree, Uuid::new_v4(), fields);
        assert_eq!(record.rank_key(), Some("硕士"));
        assert_eq!(record.to_api_value()["type_label"], json!("硕士"));
    }

    #[test]
    fn exam_records_have_no_rank_key() {
        let fields = validate_input(RecordCategory::Exam, json!({ "name": "王五", "exam_name": "CET-6" })).unwrap();
        let record = CredentialRecord::new(RecordCategory::Exam, Uuid::new_v4(), fields);
        assert_eq!(record.rank_key(), None);
    }

    #[test]
    fn api_value_flattens_fields() {
        let fields = validate_input(RecordCategory::Education, education_input()).unwrap();
        let record = CredentialRecord::new(RecordCategory::Education, Uuid::new_v4(), fields);
        let value = record.to_api_value();
        assert_eq!(value["id"], json!(record.id));
        assert_eq!(value["category"], json!("education"));
        assert_eq!(value["level"], json!("本科"));
        assert!(value.get("type_label").is_none());
    }
}
