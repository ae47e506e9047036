use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

use crate::DbPool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/migrations");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Turns on foreign key enforcement for every pooled connection. SQLite
/// leaves it off per connection by default.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    pub busy_timeout: Duration,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            busy_timeout: BUSY_TIMEOUT,
        }
    }
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn initialize_db_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    initialize_db_pool_sized(database_url, 10)
}

pub fn initialize_db_pool_sized(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas::default()))
        .build(manager)
}

/// Applies pending embedded migrations and returns how many ran.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in &applied {
        log::info!("Applied migration {}", version);
    }
    Ok(applied.len())
}
