//! JSON format.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::location::LocationResult;

pub fn response(result: &LocationResult) -> Response {
    Json(result).into_response()
}
