pub mod manager;
pub mod models;
pub mod record;
pub mod repository;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use record::{CredentialRecord, RecordError};
pub use repository::{PgRecordStore, RecordStore};
