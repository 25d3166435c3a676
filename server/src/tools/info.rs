use crate::config::Config;
use crate::db;
use crate::observations::ReferencePoint;
use crate::repos::{measurements, stations};
use crate::schema;

#[derive(Debug)]
pub struct DatasetInfo {
    pub stations: i64,
    pub measurements: i64,
    pub reference: ReferencePoint,
}

pub async fn collect(pool: &db::Pool, config: &Config) -> anyhow::Result<DatasetInfo> {
    schema::verify(pool).await?;

    let mut conn = db::acquire(pool).await?;
    Ok(DatasetInfo {
        stations: stations::count(&mut conn).await?,
        measurements: measurements::count(&mut conn).await?,
        reference: ReferencePoint::resolve(&mut conn, config).await?,
    })
}

pub async fn exec(db_url: &str, config: &Config) -> anyhow::Result<()> {
    let pool = db::pool(db_url, config.max_connections).await?;
    let info = collect(&pool, config).await?;

    println!("stations:            {}", info.stations);
    println!("measurements:        {}", info.measurements);
    println!("latest date:         {}", info.reference.latest_date);
    println!("most active station: {}", info.reference.most_active_station);
    println!("year window starts:  {}", info.reference.year_ago());
    Ok(())
}
