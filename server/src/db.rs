use anyhow::Result;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub type Pool = SqlitePool;
pub type Conn = PoolConnection<Sqlite>;
pub type Connection = sqlx::SqliteConnection;

/// Opens the dataset read-only. Nothing in this service writes to it.
pub async fn pool(database_url: &str, max_connections: u32) -> Result<Pool> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Checks out a connection for the duration of one request. It goes back to
/// the pool when the guard is dropped, whichever way the handler exits.
pub async fn acquire(pool: &Pool) -> Result<Conn> {
    let conn = pool.acquire().await?;
    Ok(conn)
}

pub async fn health(pool: &Pool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let pool = fixtures::empty_pool().await;
        health(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_pool_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let writable = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        let mut conn = writable.acquire().await.unwrap();
        crate::schema::create(&mut conn).await.unwrap();
        drop(conn);
        writable.close().await;

        let url = format!("sqlite://{}", path.display());
        let pool = pool(&url, 2).await.unwrap();
        crate::schema::verify(&pool).await.unwrap();

        let mut conn = acquire(&pool).await.unwrap();
        let insert = sqlx::query(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES ('S1', '2017-01-01', NULL, 60)",
        )
        .execute(&mut *conn)
        .await;
        assert!(insert.is_err());
    }

    #[tokio::test]
    async fn test_pool_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("missing.sqlite").display());
        assert!(pool(&url, 1).await.is_err());
    }
}
