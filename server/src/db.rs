use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::error::ApiError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Error, Debug)]
pub enum DbSetupError {
    #[error("Failed to create database pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("Failed to run database migrations: {0}")]
    Migrations(String),
}

/// Build the pool and run pending migrations on one of its connections.
pub fn create_pool(database_url: &str) -> Result<DbPool, DbSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<(), DbSetupError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbSetupError::Migrations(e.to_string()))?;

    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }

    Ok(())
}

/// Check out a pooled connection for a request.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, ApiError> {
    pool.get().map_err(ApiError::from)
}

/// Fixtures for tests that need a real database.
///
/// Tests call [`testing::test_connection`] and return early when it yields
/// `None` (no `TEST_DATABASE_URL`). Everything runs inside a test
/// transaction that is never committed.
#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::models::{NewIngredient, NewUser};
    use crate::schema::{ingredients, users};
    use diesel::upsert::excluded;
    use std::sync::Once;

    static MIGRATE: Once = Once::new();

    pub fn test_connection() -> Option<PgConnection> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;

        MIGRATE.call_once(|| {
            let mut conn = PgConnection::establish(&url).expect("Failed to connect to test DB");
            run_migrations(&mut conn).expect("Failed to migrate test DB");
        });

        let mut conn = PgConnection::establish(&url).expect("Failed to connect to test DB");
        conn.begin_test_transaction()
            .expect("Failed to begin test transaction");
        Some(conn)
    }

    /// Inserts a user whose username is `prefix` plus a random suffix.
    pub fn create_user(conn: &mut PgConnection, prefix: &str) -> i32 {
        let username = format!("{}-{}", prefix, uuid::Uuid::new_v4().simple());
        let email = format!("{}@example.com", username);
        diesel::insert_into(users::table)
            .values(&NewUser {
                email: &email,
                username: &username,
                first_name: "Test",
                last_name: "User",
                password_hash: "not-a-real-hash",
            })
            .returning(users::id)
            .get_result(conn)
            .expect("Failed to create test user")
    }

    /// Returns the id of the (name, unit) ingredient, inserting it if needed.
    pub fn create_ingredient(conn: &mut PgConnection, name: &str, unit: &str) -> i32 {
        diesel::insert_into(ingredients::table)
            .values(&NewIngredient {
                name,
                measurement_unit: unit,
            })
            .on_conflict((ingredients::name, ingredients::measurement_unit))
            .do_update()
            .set(ingredients::name.eq(excluded(ingredients::name)))
            .returning(ingredients::id)
            .get_result(conn)
            .expect("Failed to create test ingredient")
    }
}
