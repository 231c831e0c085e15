/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ranking::{RankTable, DEGREE_TYPES, EDUCATION_LEVELS, NO_RANKS};

/// The four credential record categories, one table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    StudentStatus,
    Education,
    Degree,
    Exam,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 4] = [
        RecordCategory::StudentStatus,
        RecordCategory::Education,
        RecordCategory::Degree,
        RecordCategory::Exam,
    ];

    /// URL path segment
    pub fn slug(&self) -> &'static str {
        match self {
            RecordCategory::StudentStatus => "student-status",
            RecordCategory::Education => "education",
            RecordCategory::Degree => "degree",
            RecordCategory::Exam => "exam",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordCategory::StudentStatus => "学籍",
            RecordCategory::Education => "学历",
            RecordCategory::Degree => "学位",
            RecordCategory::Exam => "考试",
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            RecordCategory::StudentStatus => "student_status_records",
            RecordCategory::Education => "education_records",
            RecordCategory::Degree => "degree_records",
            RecordCategory::Exam => "exam_records",
        }
    }

    /// Field holding the classification used for ordering
    pub fn rank_field(&self) -> Option<&'static str> {
        match self {
            RecordCategory::StudentStatus | RecordCategory::Education => Some("level"),
            RecordCategory::Degree => Some("degree_type"),
            RecordCategory::Exam => None,
        }
    }

    pub fn rank_table(&self) -> &'static RankTable {
        match self {
            RecordCategory::StudentStatus | RecordCategory::Education => &EDUCATION_LEVELS,
            RecordCategory::Degree => &DEGREE_TYPES,
            RecordCategory::Exam => &NO_RANKS,
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordCategory::StudentStatus | RecordCategory::Education => &["name", "school", "level"],
            RecordCategory::Degree => &["name", "school", "degree_type"],
            RecordCategory::Exam => &["name", "exam_name"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for RecordCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student-status" | "student_status" => Ok(RecordCategory::StudentStatus),
            "education" => Ok(RecordCategory::Education),
            "degree" => Ok(RecordCategory::Degree),
            "exam" => Ok(RecordCategory::Exam),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
