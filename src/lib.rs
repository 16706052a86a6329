//! Campus event management API: events, students, registrations, feedback
//! and aggregate reports over a single SQLite database.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;

pub use db::Database;

/// Shared by every handler. The database handle is created by the entry
/// point and cloned into each request; clones share one pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
