use serde_json::{json, Value};

use crate::cli::commands::rank::FieldRecord;
use crate::cli::OutputFormat;
use crate::ranking::{RankTable, Rankable};
use crate::types::RecordCategory;

/// Pretty-print a JSON value
pub fn output_value(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output ordered records: the JSON array as-is, or one line per record with its rank
pub fn output_records(
    output_format: &OutputFormat,
    category: RecordCategory,
    records: &[FieldRecord],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let array: Vec<Value> = records.iter().map(|r| Value::Object(r.fields.clone())).collect();
            output_value(&Value::Array(array))
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No records");
                return Ok(());
            }
            let table = category.rank_table();
            for record in records {
                println!(
                    "{:>3}  {:<12}  {}",
                    table.rank(record.rank_key()),
                    key_label(table, record.rank_key()),
                    serde_json::to_string(&record.fields)?
                );
            }
            Ok(())
        }
    }
}

/// Rank key for text output; labels the table does not list are flagged
fn key_label(table: &RankTable, key: Option<&str>) -> String {
    match key {
        None | Some("") => "-".to_string(),
        Some(k) if table.is_empty() || table.contains(k) => k.to_string(),
        Some(k) => format!("{} (unlisted)", k),
    }
}
