//! Echo Handler
//!
//! `GET|POST /api/echo/` returns the JSON object it was sent, plus the
//! request's `content_type`. Handy for checking what a client actually puts
//! on the wire.

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    errors::ApiError,
    http::{Json, Request},
    products::validation,
};

pub async fn handler<S>(_state: S, req: Request) -> Result<Json<Value>, ApiError> {
    for (name, value) in req.headers() {
        debug!(header = %name, %value, "echo request header");
    }

    let mut data = if req.body().iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        let payload: Value = req.json()?;
        validation::expect_object(&payload)?.clone()
    };

    data.insert("content_type".to_owned(), Value::String(media_type(&req).to_owned()));

    Ok(Json(Value::Object(data)))
}

/// The `content-type` header without its parameters (`; charset=...`).
fn media_type(req: &Request) -> &str {
    let raw = req.header("content-type").unwrap_or_default();

    raw.split_once(';').map_or(raw, |(media, _)| media).trim()
}
