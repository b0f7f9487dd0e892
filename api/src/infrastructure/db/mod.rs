use sqlx::{Pool, Postgres};

use crate::application::ports::store_conflict::StoreConflict;

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Embedded at compile time from ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Turns a unique-constraint violation into `conflict()`; other errors pass through.
pub fn unique_or(err: sqlx::Error, conflict: impl FnOnce() -> StoreConflict) -> anyhow::Error {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        tracing::debug!(error = %err, "unique_violation");
        conflict().into()
    } else {
        err.into()
    }
}

pub mod repositories;
