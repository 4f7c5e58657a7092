//! Presence checks on JSON request bodies.
//!
//! A field counts as absent when it is missing, `null`, `false`, an empty
//! string, or numeric zero.

use crate::error::AppError;
use serde_json::{Map, Value};

pub type Body = Map<String, Value>;

pub fn body_to_map(value: Value) -> Result<Body, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// The field as a non-empty string, or `None` when absent or not a string.
pub fn present_str<'a>(body: &'a Body, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// The field as a non-zero amount. Accepts JSON numbers and numeric strings.
pub fn present_amount(body: &Body, key: &str) -> Result<Option<f64>, AppError> {
    let amount = match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(
            s.trim()
                .parse::<f64>()
                .map_err(|_| AppError::BadRequest(format!("{} must be a number", key)))?,
        ),
        Some(_) => return Err(AppError::BadRequest(format!("{} must be a number", key))),
    };
    Ok(amount.filter(|a| *a != 0.0 && a.is_finite()))
}
