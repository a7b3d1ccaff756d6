//! Line codec for the backend channel.
//!
//! Each outbound query is one JSON string literal followed by `\n`; each
//! inbound reply is one JSON value per line.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Reply, ResultRecord};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a raw query as a single newline-terminated line.
pub fn encode_query(query: &str) -> Result<String, CodecError> {
    let mut line = serde_json::to_string(query)?;
    line.push('\n');
    Ok(line)
}

/// Decode one reply line.
pub fn decode_reply(line: &str) -> Result<Reply, CodecError> {
    let value: Value = serde_json::from_str(line.trim())?;
    Ok(reply_from_value(value))
}

fn reply_from_value(value: Value) -> Reply {
    if is_falsy(&value) {
        return Reply::Falsy;
    }
    match value {
        Value::Array(items) => Reply::Records(items.iter().map(record_from_value).collect()),
        _ => Reply::Unexpected,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn record_from_value(value: &Value) -> ResultRecord {
    match value {
        Value::Object(fields) => ResultRecord {
            name: text_field(fields, "name"),
            full_path: text_field(fields, "fullPath"),
        },
        _ => ResultRecord::default(),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        for raw in ["null", "false", "0", "0.0", "\"\""] {
            let value: Value = serde_json::from_str(raw).unwrap();
            assert!(is_falsy(&value), "{raw} should be falsy");
        }
        for raw in ["true", "1", "\"x\"", "[]", "{}"] {
            let value: Value = serde_json::from_str(raw).unwrap();
            assert!(!is_falsy(&value), "{raw} should be truthy");
        }
    }
}
