//! `POST /uppercase` and `POST /count`.
//!
//! Each handler counts itself in flight for graceful drain and hands the raw
//! body to its transport binding.

use axum::extract::State;
use axum::response::Response;
use bytes::Bytes;

use super::AppState;

pub async fn uppercase_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let _in_flight = state.shutdown.in_flight_guard();
    state.uppercase.serve(&body).await
}

pub async fn count_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let _in_flight = state.shutdown.in_flight_guard();
    state.count.serve(&body).await
}
