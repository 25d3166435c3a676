use shared::{ErrorMessage, Precipitation, RangeError, StationEntry, TemperatureReading};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::db;
use crate::observations::{self, parse_date, BadDate, ReferencePoint};
use crate::repos::{measurements, stations};
use crate::schema;

const INDEX: &str = "Available Routes:<br/>\
    /api/v1.0/precipitation<br/>\
    /api/v1.0/stations<br/>\
    /api/v1.0/tobs<br/>\
    /api/v1.0/start<br/>\
    /api/v1.0/start/end<br/>\
    <br/>\
    For all dates, please use YYYY-MM-DD format.";

#[derive(Clone)]
pub struct AppState {
    pub pool: db::Pool,
    pub reference: ReferencePoint,
}

pub async fn run(
    address: std::net::SocketAddr,
    database_url: &str,
    config: &Config,
) -> anyhow::Result<()> {
    let state = prepare(database_url, config).await?;
    log::info!("Listening on {}", address);
    warp::serve(routes(state)).run(address).await;
    Ok(())
}

/// Connects, checks the schema and resolves the reference point.
pub async fn prepare(database_url: &str, config: &Config) -> anyhow::Result<AppState> {
    let pool = db::pool(database_url, config.max_connections).await?;
    schema::verify(&pool).await?;

    let mut conn = db::acquire(&pool).await?;
    let reference = ReferencePoint::resolve(&mut conn, config).await?;
    drop(conn);

    log::info!(
        "Latest observation {}, most active station {}",
        reference.latest_date,
        reference.most_active_station
    );

    Ok(AppState { pool, reference })
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index_route = warp::path::end().and(warp::get()).map(|| warp::reply::html(INDEX));

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(health);

    let precipitation_route = warp::path!("api" / "v1.0" / "precipitation")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(precipitation);

    let stations_route = warp::path!("api" / "v1.0" / "stations")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(station_list);

    let tobs_route = warp::path!("api" / "v1.0" / "tobs")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(tobs);

    let start_route = warp::path!("api" / "v1.0" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(temperature_from);

    let range_route = warp::path!("api" / "v1.0" / String / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(temperature_range);

    index_route
        .or(health_route)
        .or(precipitation_route)
        .or(stations_route)
        .or(tobs_route)
        .or(start_route)
        .or(range_route)
        .recover(rejection)
        .with(warp::log("climate::api"))
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub async fn health(state: AppState) -> Result<impl Reply, Rejection> {
    db::health(&state.pool)
        .await
        .map_err(internal)
        .map(|_| StatusCode::OK)
}

pub async fn precipitation(state: AppState) -> Result<impl Reply, Rejection> {
    let mut conn = db::acquire(&state.pool).await.map_err(internal)?;
    let rows = measurements::precipitation_since(&mut conn, state.reference.year_ago())
        .await
        .map_err(internal)?;

    let by_date: Precipitation = rows.into_iter().collect();
    Ok(warp::reply::json(&by_date))
}

pub async fn station_list(state: AppState) -> Result<impl Reply, Rejection> {
    let mut conn = db::acquire(&state.pool).await.map_err(internal)?;
    let rows = stations::list(&mut conn).await.map_err(internal)?;

    let entries: Vec<StationEntry> = rows.into_iter().map(StationEntry::from).collect();
    Ok(warp::reply::json(&entries))
}

pub async fn tobs(state: AppState) -> Result<impl Reply, Rejection> {
    let reference = &state.reference;
    let mut conn = db::acquire(&state.pool).await.map_err(internal)?;
    let rows = measurements::temperatures_since(
        &mut conn,
        &reference.most_active_station,
        reference.year_ago(),
    )
    .await
    .map_err(internal)?;

    let readings: Vec<TemperatureReading> = rows
        .into_iter()
        .map(|(date, temperature)| TemperatureReading { date, temperature })
        .collect();
    Ok(warp::reply::json(&readings))
}

pub async fn temperature_from(start: String, state: AppState) -> Result<impl Reply, Rejection> {
    let start = parse_date(&start).map_err(bad_request)?;

    let mut conn = db::acquire(&state.pool).await.map_err(internal)?;
    let aggregates = measurements::temperature_aggregates(&mut conn, start, None)
        .await
        .map_err(internal)?;

    Ok(warp::reply::json(&observations::summarize(aggregates)))
}

pub async fn temperature_range(
    start: String,
    end: String,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let start = parse_date(&start).map_err(bad_request)?;
    let end = parse_date(&end).map_err(bad_request)?;

    if start > end {
        return Ok(warp::reply::json(&RangeError::reversed()));
    }

    let mut conn = db::acquire(&state.pool).await.map_err(internal)?;
    let aggregates = measurements::temperature_aggregates(&mut conn, start, Some(end))
        .await
        .map_err(internal)?;

    Ok(warp::reply::json(&observations::summarize(aggregates)))
}

#[derive(Debug)]
struct Error(anyhow::Error);
impl warp::reject::Reject for Error {}

#[derive(Debug)]
struct BadRequest(BadDate);
impl warp::reject::Reject for BadRequest {}

fn internal<E: Into<anyhow::Error>>(err: E) -> Rejection {
    warp::reject::custom(Error(err.into()))
}

fn bad_request(err: BadDate) -> Rejection {
    warp::reject::custom(BadRequest(err))
}

fn error_reply(code: StatusCode, message: String) -> impl Reply {
    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });
    warp::reply::with_status(json, code)
}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    // Later routes still run after a handler fails, so a storage error can
    // come combined with a date rejection for the same path.
    if let Some(Error(e)) = err.find::<Error>() {
        log::error!("Error: {:?}", e);
        return Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".into(),
        ));
    }

    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found.".into()));
    }

    if let Some(BadRequest(bad_date)) = err.find::<BadRequest>() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, bad_date.to_string()));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed.".into(),
        ));
    }

    log::error!("Error: {:?}", err);
    Ok(error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error.".into(),
    ))
}
