use chrono::NaiveDate;

use crate::db;
use crate::models::{Aggregates, PrecipitationRow, TemperatureRow};
use crate::observations::format_date;

pub async fn precipitation_since(
    conn: &mut db::Connection,
    since: NaiveDate,
) -> anyhow::Result<Vec<PrecipitationRow>> {
    let stmt = "SELECT date, prcp FROM measurement \
                WHERE date >= ? \
                ORDER BY date ASC, id ASC";
    let rows: Vec<PrecipitationRow> = sqlx::query_as(stmt)
        .bind(format_date(since))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn temperatures_since(
    conn: &mut db::Connection,
    station: &str,
    since: NaiveDate,
) -> anyhow::Result<Vec<TemperatureRow>> {
    let stmt = "SELECT date, tobs FROM measurement \
                WHERE station = ? AND date >= ? \
                ORDER BY date ASC, id ASC";
    let rows: Vec<TemperatureRow> = sqlx::query_as(stmt)
        .bind(station)
        .bind(format_date(since))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Min, max and average temperature from `start`, up to `end` when given.
/// Both bounds are inclusive.
pub async fn temperature_aggregates(
    conn: &mut db::Connection,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> anyhow::Result<Aggregates> {
    let aggregates: Aggregates = match end {
        Some(end) => {
            sqlx::query_as(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement \
                 WHERE date >= ? AND date <= ?",
            )
            .bind(format_date(start))
            .bind(format_date(end))
            .fetch_one(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement \
                 WHERE date >= ?",
            )
            .bind(format_date(start))
            .fetch_one(&mut *conn)
            .await?
        }
    };
    Ok(aggregates)
}

/// Latest observation date, as stored.
pub async fn latest_date(conn: &mut db::Connection) -> anyhow::Result<Option<String>> {
    let (date,): (Option<String>,) = sqlx::query_as("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    Ok(date)
}

/// Station with the most measurements. Ties go to the lowest station id.
pub async fn most_active_station(conn: &mut db::Connection) -> anyhow::Result<Option<String>> {
    let row: Option<(String, i64)> = sqlx::query_as(
        "SELECT station, COUNT(*) AS observations FROM measurement \
         GROUP BY station \
         ORDER BY observations DESC, station ASC \
         LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|(station, _)| station))
}

pub async fn count(conn: &mut db::Connection) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
