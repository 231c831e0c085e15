use std::fs;
use std::io::Read;

use anyhow::{bail, Context};
use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::cli::utils::{output_records, output_value};
use crate::cli::OutputFormat;
use crate::database::record::rank_key_for;
use crate::ranking::{extract_degree_type, insert_by_rank, sort_by_rank, Rankable};
use crate::types::RecordCategory;

#[derive(Subcommand)]
pub enum RankCommands {
    #[command(about = "Sort a JSON array of records into display order")]
    Sort {
        #[arg(long, short, help = "Record category (student-status, education, degree, exam)")]
        category: RecordCategory,
        #[arg(long, short, default_value = "-", help = "JSON file with an array of records, '-' for stdin")]
        input: String,
    },

    #[command(about = "Insert one record into an already sorted JSON array")]
    Insert {
        #[arg(long, short, help = "Record category (student-status, education, degree, exam)")]
        category: RecordCategory,
        #[arg(long, short, default_value = "-", help = "JSON file with the sorted records, '-' for stdin")]
        input: String,
        #[arg(long, short, help = "The new record as a JSON object")]
        record: String,
    },

    #[command(about = "List the rank labels of a category, highest priority first")]
    Levels {
        #[arg(help = "Record category")]
        category: RecordCategory,
    },

    #[command(about = "Extract the short degree type from a degree description")]
    DegreeType {
        #[arg(help = "Degree description, e.g. 电子信息硕士专业学位")]
        description: String,
    },
}

/// A record read from a file: category plus its loose field map
#[derive(Debug, Clone)]
pub struct FieldRecord {
    pub category: RecordCategory,
    pub fields: Map<String, Value>,
}

impl Rankable for FieldRecord {
    fn rank_key(&self) -> Option<&str> {
        rank_key_for(self.category, &self.fields)
    }
}

pub fn handle(cmd: RankCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        RankCommands::Sort { category, input } => {
            let records = parse_records(category, &read_input(&input)?)?;
            let sorted = sort_by_rank(&records, category.rank_table());
            output_records(&output_format, category, &sorted)
        }
        RankCommands::Insert { category, input, record } => {
            let records = parse_records(category, &read_input(&input)?)?;
            let record = parse_record(category, serde_json::from_str(&record).context("--record is not valid JSON")?)?;
            let inserted = insert_by_rank(&records, record, category.rank_table());
            output_records(&output_format, category, &inserted)
        }
        RankCommands::Levels { category } => {
            let levels = category.rank_table().labels();
            match output_format {
                OutputFormat::Json => output_value(&json!({ "category": category.slug(), "levels": levels })),
                OutputFormat::Text => {
                    for (position, label) in levels.iter().enumerate() {
                        println!("{}. {}", position + 1, label);
                    }
                    Ok(())
                }
            }
        }
        RankCommands::DegreeType { description } => {
            let label = extract_degree_type(&description);
            match output_format {
                OutputFormat::Json => output_value(&json!({ "description": description, "type": label })),
                OutputFormat::Text => {
                    println!("{}", label);
                    Ok(())
                }
            }
        }
    }
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read records from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
    }
}

fn parse_records(category: RecordCategory, text: &str) -> anyhow::Result<Vec<FieldRecord>> {
    let value: Value = serde_json::from_str(text).context("records input is not valid JSON")?;
    match value {
        Value::Array(items) => items.into_iter().map(|item| parse_record(category, item)).collect(),
        _ => bail!("records input must be a JSON array"),
    }
}

fn parse_record(category: RecordCategory, value: Value) -> anyhow::Result<FieldRecord> {
    match value {
        Value::Object(fields) => Ok(FieldRecord { category, fields }),
        other => bail!("each record must be a JSON object, got: {}", other),
    }
}
