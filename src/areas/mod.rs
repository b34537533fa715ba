//! On-disk repository areas
//!
//! - `database`: Loose object store holding commit records
//! - `refs`: Branch references under `refs/heads`
//! - `repository`: Repository discovery and coordination of the areas

pub mod database;
pub mod refs;
pub mod repository;
