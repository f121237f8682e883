use std::env::{self, VarError};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::PgConnection;
use once_cell::sync::Lazy;
use revo_store::db::{self, PgPool};
use revo_store::migrate::{self, Migrations};
use tokio::sync::Mutex;

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pub pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let database_url = database_url()?;
        let pool = db::init_pool_with_size(&database_url, db::DEFAULT_MAX_POOL_SIZE)?;
        let db = Self { pool };
        db.with_conn(|conn| {
            migrate::run_pending(conn, &Migrations::Embedded)?;
            truncate_all(conn)
        })
        .await?;
        Ok(db)
    }

    pub async fn cleanup(&self) -> Result<()> {
        self.with_conn(truncate_all).await
    }

    pub async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PgConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db::checkout(&pool).context("failed to get database connection")?;
            f(&mut conn)
        })
        .await
        .context("connection task panicked")?
    }
}

pub fn database_url() -> Result<String> {
    require_database_url(env::var("TEST_DATABASE_URL"))
}

pub fn require_database_url(value: Result<String, VarError>) -> Result<String> {
    value.context("TEST_DATABASE_URL must be set for integration tests")
}

pub async fn acquire_db_lock() -> tokio::sync::MutexGuard<'static, ()> {
    DB_LOCK.lock().await
}

/// Fixed instant plus `minutes`, so ordering assertions are deterministic.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 8, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn truncate_all(conn: &mut PgConnection) -> Result<()> {
    conn.batch_execute("TRUNCATE TABLE users, activities, posts;")
        .context("failed to truncate tables")?;
    Ok(())
}
