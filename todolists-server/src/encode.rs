//! Response encoder
//!
//! Stored values are first serialized to BSON, which keeps ObjectIds and
//! date-times as distinct types, then lowered to JSON:
//! - ObjectId -> 24-character hex string
//! - date-time -> `YYYY-MM-DDTHH:MM:SS[.ffffff]` (UTC, no offset)
//! - everything else -> its plain JSON counterpart

use axum::response::{IntoResponse, Response};
use axum::Json;
use bson::Bson;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::http::error::ApiError;

/// Serialize a stored value to wire JSON.
///
/// # Errors
///
/// Fails only if the value cannot be represented as BSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<Value, bson::ser::Error> {
    Ok(bson_to_json(bson::to_bson(value)?))
}

/// Lower a BSON value to JSON, special-casing ids and date-times.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(isoformat(dt)),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect::<Map<_, _>>(),
        ),
        Bson::Array(values) => Value::Array(values.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

fn isoformat(dt: bson::DateTime) -> String {
    let dt = dt.to_chrono();
    if dt.timestamp_subsec_micros() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Response wrapper that runs the encoder at the HTTP boundary.
#[derive(Debug)]
pub struct Encoded<T>(pub T);

impl<T: Serialize> IntoResponse for Encoded<T> {
    fn into_response(self) -> Response {
        match to_json(&self.0) {
            Ok(body) => Json(body).into_response(),
            Err(e) => ApiError::Encode(e).into_response(),
        }
    }
}
