//! Cohort Tools - REST API for cohorts and their students
//!
//! CRUD over two related collections in a SQLite-backed document store, with read-time
//! population of each student's cohort.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use store::{Database, ObjectId, StoreConfig};
