//! `application/x-www-form-urlencoded` request bodies.
//!
//! Bodies are serialized through `serde_json` (with `preserve_order`, so keys
//! keep their declaration order) and then flattened to key/value strings.
//! Keys whose value is falsy (`null`, `false`, `0`, `""`) are dropped, not
//! encoded as empty. That includes a legitimate zero such as `count: 0`.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Encode a body as a form string, e.g. `query=mondago&count=5`.
///
/// `()` and `None` encode to the empty string.
///
/// # Errors
///
/// Returns [`Error::InvalidBody`] when the body is not a map or struct, and
/// serialization errors from `serde_json` / `serde_urlencoded`.
pub fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, Error> {
    let fields = match serde_json::to_value(body)? {
        Value::Null => return Ok(String::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(Error::InvalidBody(format!(
                "expected key/value fields, got {}",
                kind(&other)
            )));
        }
    };

    let pairs = fields
        .into_iter()
        .filter(|(_, value)| is_truthy(value))
        .map(|(key, value)| (key, stringify(&value)))
        .collect::<Vec<_>>();

    Ok(serde_urlencoded::to_string(&pairs)?)
}

/// Whether a value survives encoding.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_i64()
            .map_or_else(|| number.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()), |i| i != 0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => stringify_number(number),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn stringify_number(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        // 5.0 goes on the wire as "5"
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
