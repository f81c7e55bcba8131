use crate::game::SharedTable;
use std::convert::Infallible;
use warp::{http::StatusCode, reply::json, Filter, Rejection, Reply};

type Result<T> = std::result::Result<T, Rejection>;

pub fn routes(
    table: SharedTable,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path!("health").and_then(health_handler);
    let status_route = warp::path!("status")
        .and(warp::get())
        .and(with_table(table))
        .and_then(status_handler);
    health_route.or(status_route)
}

fn with_table(table: SharedTable) -> impl Filter<Extract = (SharedTable,), Error = Infallible> + Clone {
    warp::any().map(move || table.clone())
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

pub async fn status_handler(table: SharedTable) -> Result<impl Reply> {
    let status = table.lock().await.status();
    Ok(json(&status))
}
