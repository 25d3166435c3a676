use crate::db;
use crate::models::Station;

/// All stations in storage order.
pub async fn list(conn: &mut db::Connection) -> anyhow::Result<Vec<Station>> {
    let stmt = "SELECT id, station, name, latitude, longitude, elevation \
                FROM station \
                ORDER BY id";
    let stations = sqlx::query_as::<_, Station>(stmt)
        .fetch_all(&mut *conn)
        .await?;
    Ok(stations)
}

pub async fn count(conn: &mut db::Connection) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM station")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
