use sqlx::SqlitePool;

/// Runs the SQL processors in [`crate::entities`] against a SQLite pool.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: SqlitePool,
}

impl DatabaseProcessor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
