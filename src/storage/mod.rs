pub mod collection;
mod customers;
pub mod db;
mod history;
mod merchants;
pub mod models;
mod payments;
mod revoked_tokens;
mod tables;

pub use collection::{Collection, JsonFile, Medium, Memory, Record, StoreError};
pub use db::Database;
pub use tables::*;
