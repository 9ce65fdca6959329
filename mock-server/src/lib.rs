//! Fixture server answering with caller-chosen statuses and headers.
//!
//! Integration tests point real HTTP clients at it and turn the answers into
//! response descriptors, so every route is driven by the request path or
//! query rather than by server state.

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

/// Header added to every fixture answer so tests can tell them apart from
/// framework-generated responses.
pub const FIXTURE_HEADER: &str = "x-fixture";

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", get(status))
        .route("/headers", get(headers))
        .route("/text", get(text))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Answer with `code` and an empty body. Codes outside 100..=999 are 400.
async fn status(Path(code): Path<u16>) -> Result<impl IntoResponse, StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    tracing::debug!(code, "status fixture");
    Ok((status, [(FIXTURE_HEADER, "status")]))
}

/// Answer 200 with every query pair echoed back as a response header.
/// Repeated names become repeated header lines.
async fn headers(
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, StatusCode> {
    let mut map = HeaderMap::new();
    map.insert(FIXTURE_HEADER, HeaderValue::from_static("headers"));
    for (name, value) in pairs {
        let name = HeaderName::try_from(name).map_err(|_| StatusCode::BAD_REQUEST)?;
        let value = HeaderValue::try_from(value).map_err(|_| StatusCode::BAD_REQUEST)?;
        map.append(name, value);
    }
    tracing::debug!(headers = map.len(), "headers fixture");
    Ok((StatusCode::OK, map))
}

async fn text() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(FIXTURE_HEADER, "text")],
        "hello from the fixture server\n",
    )
}
