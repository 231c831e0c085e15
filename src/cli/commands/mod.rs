pub mod health;
pub mod rank;
