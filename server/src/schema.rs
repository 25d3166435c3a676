//! Declared layout of the dataset. Nothing is introspected: startup only
//! checks that the declared columns can be selected.
//!
//! ```text
//! station(id, station, name, latitude, longitude, elevation)
//! measurement(id, station, date, prcp, tobs)
//! ```

use anyhow::Context;

use crate::db;

#[cfg(test)]
pub const CREATE_STATION: &str = r#"
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT NOT NULL,
        longitude FLOAT NOT NULL,
        elevation FLOAT NOT NULL
    )"#;

#[cfg(test)]
pub const CREATE_MEASUREMENT: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT NOT NULL
    )"#;

const PROBES: [(&str, &str); 2] = [
    (
        "station",
        "SELECT id, station, name, latitude, longitude, elevation FROM station LIMIT 0",
    ),
    (
        "measurement",
        "SELECT id, station, date, prcp, tobs FROM measurement LIMIT 0",
    ),
];

/// Fails if a declared table or column is missing from the dataset.
pub async fn verify(pool: &db::Pool) -> anyhow::Result<()> {
    for (table, probe) in PROBES {
        sqlx::query(probe)
            .execute(pool)
            .await
            .with_context(|| format!("Dataset does not match the `{}` schema", table))?;
    }
    Ok(())
}

/// Creates both tables for fixtures.
#[cfg(test)]
pub async fn create(conn: &mut db::Connection) -> anyhow::Result<()> {
    for stmt in [CREATE_STATION, CREATE_MEASUREMENT] {
        sqlx::query(stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_declared_schema() {
        let pool = db::fixtures::pool().await;
        verify(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_rejects_missing_column() {
        let pool = db::fixtures::empty_pool().await;
        sqlx::query("CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(CREATE_MEASUREMENT).execute(&pool).await.unwrap();

        let err = verify(&pool).await.unwrap_err();
        assert!(err.to_string().contains("`station` schema"));
    }

    #[tokio::test]
    async fn test_verify_rejects_missing_table() {
        let pool = db::fixtures::empty_pool().await;
        assert!(verify(&pool).await.is_err());
    }
}
