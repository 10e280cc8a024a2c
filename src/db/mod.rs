pub mod connection;
pub mod reports;
pub mod seed;

pub use connection::{init_db, Database};
