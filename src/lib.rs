pub mod codes;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod schema;
pub mod store;
pub mod validation;

pub use error::{StoreError, StoreResult};
