pub mod api;
pub mod classifier;
pub mod config;
pub mod db;
pub mod errors;
pub mod ingest;
pub mod metadata;
pub mod models;
pub mod observability;
pub mod schema;
#[cfg(test)]
pub mod test_helpers;
pub mod validation;

// Type definitions
use actix_web::web;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type RqDbPool = web::Data<DbPool>;
