//! Ranked record ordering.
//!
//! Records are displayed in a fixed priority order (doctorate > master >
//! bachelor > associate). A [`RankTable`] maps a classification label to a
//! small integer rank; labels missing from the table get [`SENTINEL_RANK`]
//! and sort after everything known.
//!
//! All functions here are pure: they take borrowed input and return new
//! vectors. State ownership stays with the caller.

pub mod degree;
pub mod order;
pub mod rank_table;

pub use degree::{extract_degree_type, DEGREE_TYPE_TOKENS};
pub use order::{insert_by_rank, sort_by_rank, Rankable};
pub use rank_table::{RankTable, DEGREE_TYPES, EDUCATION_LEVELS, NO_RANKS, SENTINEL_RANK};
